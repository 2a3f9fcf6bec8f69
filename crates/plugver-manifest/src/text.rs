//! Text decoding helpers shared by the extractor and the refresher

/// Decode ISO-8859-1: every byte is the code point of the same value
pub fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}

/// Fold `\r\n` and lone `\r` into `\n`
pub fn normalize_newlines(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_latin1() {
        assert_eq!(decode_latin1(b"caf\xe9 \xff"), "caf\u{e9} \u{ff}");
        assert_eq!(decode_latin1(b"plain"), "plain");
    }

    #[test]
    fn test_normalize_newlines() {
        assert_eq!(normalize_newlines("a\r\nb\rc\n"), "a\nb\nc\n");
    }
}
