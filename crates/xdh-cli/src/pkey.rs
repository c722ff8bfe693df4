//! Public-key display command implementation.

use std::fs;

use xdh_crypto::x25519::X25519PrivateKey;
use xdh_crypto::x448::X448PrivateKey;

use crate::hexstr;

pub fn run(input: &str) -> Result<(), Box<dyn std::error::Error>> {
    let key = hexstr::decode(&fs::read_to_string(input)?)?;

    let pub_hex = match key.len() {
        32 => {
            let sk = X25519PrivateKey::new(&key)?;
            hexstr::encode(sk.public_key().as_bytes())
        }
        56 => {
            let sk = X448PrivateKey::new(&key)?;
            hexstr::encode(sk.public_key().as_bytes())
        }
        n => return Err(format!("unsupported key length: {n} bytes (expected 32 or 56)").into()),
    };

    println!("{pub_hex}");
    Ok(())
}
