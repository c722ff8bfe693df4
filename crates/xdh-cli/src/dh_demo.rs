//! Two-party key-exchange demonstration.

use xdh_crypto::x25519::X25519PrivateKey;
use xdh_crypto::x448::X448PrivateKey;

use crate::hexstr;

pub fn run(algorithm: &str) -> Result<(), Box<dyn std::error::Error>> {
    match algorithm.to_lowercase().as_str() {
        "x25519" => demo_x25519(),
        "x448" => demo_x448(),
        _ => Err(format!("unsupported algorithm: {algorithm}").into()),
    }
}

fn demo_x25519() -> Result<(), Box<dyn std::error::Error>> {
    eprintln!("Running X25519 key exchange...");
    let alice = X25519PrivateKey::generate()?;
    let bob = X25519PrivateKey::generate()?;

    let alice_pub = alice.public_key();
    let bob_pub = bob.public_key();
    println!("alice public: {}", hexstr::encode(alice_pub.as_bytes()));
    println!("bob public:   {}", hexstr::encode(bob_pub.as_bytes()));

    let alice_shared = alice.diffie_hellman(&bob_pub)?;
    let bob_shared = bob.diffie_hellman(&alice_pub)?;
    if alice_shared != bob_shared {
        return Err("shared secrets disagree".into());
    }
    println!("shared:       {}", hexstr::encode(&alice_shared));
    Ok(())
}

fn demo_x448() -> Result<(), Box<dyn std::error::Error>> {
    eprintln!("Running X448 key exchange...");
    let alice = X448PrivateKey::generate()?;
    let bob = X448PrivateKey::generate()?;

    let alice_pub = alice.public_key();
    let bob_pub = bob.public_key();
    println!("alice public: {}", hexstr::encode(alice_pub.as_bytes()));
    println!("bob public:   {}", hexstr::encode(bob_pub.as_bytes()));

    let alice_shared = alice.diffie_hellman(&bob_pub)?;
    let bob_shared = bob.diffie_hellman(&alice_pub)?;
    if alice_shared != bob_shared {
        return Err("shared secrets disagree".into());
    }
    println!("shared:       {}", hexstr::encode(&alice_shared));
    Ok(())
}
