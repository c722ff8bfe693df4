//! Hex formatting for key files and terminal output.

pub fn encode(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

pub fn decode(s: &str) -> Result<Vec<u8>, String> {
    let s = s.trim();
    if !s.is_ascii() {
        return Err("non-ascii hex string".into());
    }
    if s.len() % 2 != 0 {
        return Err("odd-length hex string".into());
    }
    (0..s.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&s[i..i + 2], 16).map_err(|e| format!("bad hex: {e}")))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip() {
        let bytes = [0x00, 0x7f, 0xff, 0x42];
        assert_eq!(decode(&encode(&bytes)).unwrap(), bytes);
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(decode("abc").is_err());
        assert!(decode("zz").is_err());
    }

    #[test]
    fn test_decode_trims_whitespace() {
        assert_eq!(decode("0a0b\n").unwrap(), vec![0x0a, 0x0b]);
    }
}
