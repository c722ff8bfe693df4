//! Key generation command implementation.

use std::fs;

use xdh_crypto::x25519::X25519PrivateKey;
use xdh_crypto::x448::X448PrivateKey;

use crate::hexstr;

pub fn run(algorithm: &str, output: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    let hex = match algorithm.to_lowercase().as_str() {
        "x25519" => {
            eprintln!("Generating X25519 key...");
            let sk = X25519PrivateKey::generate()?;
            hexstr::encode(sk.as_bytes())
        }
        "x448" => {
            eprintln!("Generating X448 key...");
            let sk = X448PrivateKey::generate()?;
            hexstr::encode(sk.as_bytes())
        }
        _ => return Err(format!("unsupported algorithm: {algorithm}").into()),
    };

    if let Some(path) = output {
        fs::write(path, format!("{hex}\n"))?;
        eprintln!("Key written to {path}");
    } else {
        println!("{hex}");
    }
    Ok(())
}
