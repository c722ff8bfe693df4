//! Shared-secret derivation command implementation.

use std::fs;

use xdh_crypto::x25519::{X25519PrivateKey, X25519PublicKey};
use xdh_crypto::x448::{X448PrivateKey, X448PublicKey};

use crate::hexstr;

pub fn run(key: &str, peer_key: &str) -> Result<(), Box<dyn std::error::Error>> {
    let sk = hexstr::decode(&fs::read_to_string(key)?)?;
    let pk = hexstr::decode(&fs::read_to_string(peer_key)?)?;

    if sk.len() != pk.len() {
        return Err(
            "derive: key type mismatch (both keys must be X25519 or both X448)".into(),
        );
    }

    let shared = match sk.len() {
        32 => {
            let sk = X25519PrivateKey::new(&sk)?;
            let pk = X25519PublicKey::new(&pk)?;
            sk.diffie_hellman(&pk)?.to_vec()
        }
        56 => {
            let sk = X448PrivateKey::new(&sk)?;
            let pk = X448PublicKey::new(&pk)?;
            sk.diffie_hellman(&pk)?.to_vec()
        }
        n => return Err(format!("unsupported key length: {n} bytes (expected 32 or 56)").into()),
    };

    println!("{}", hexstr::encode(&shared));
    Ok(())
}
