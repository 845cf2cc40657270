//! Small text helpers shared by exporters

use std::fmt::Write as _;

use chrono::{DateTime, FixedOffset, Local};

const HEX: &[u8; 16] = b"0123456789ABCDEF";

/// Soft line limit for quoted-printable output
const QP_LINE_LIMIT: usize = 73;

/// Round to `digits` decimals, ties to even, and print without trailing zeros
///
/// ```
/// use folio_encoding::text::float_to_string;
/// assert_eq!(float_to_string(0.125, 2), "0.12");
/// assert_eq!(float_to_string(10.0, 2), "10");
/// ```
pub fn float_to_string(value: f64, digits: u32) -> String {
    let scale = 10f64.powi(digits.min(15) as i32);
    let rounded = (value * scale).round_ties_even() / scale;
    // Avoid printing "-0"
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };
    rounded.to_string()
}

/// Two uppercase hex digits
pub fn byte_to_hex(byte: u8) -> String {
    let mut s = String::with_capacity(2);
    s.push(HEX[usize::from(byte >> 4)] as char);
    s.push(HEX[usize::from(byte & 0x0F)] as char);
    s
}

/// Four uppercase hex digits, high byte first
pub fn u16_to_hex(word: u16) -> String {
    let [hi, lo] = word.to_be_bytes();
    let mut s = byte_to_hex(hi);
    s.push_str(&byte_to_hex(lo));
    s
}

/// Two hex digits per character, keeping only the low byte of each
pub fn str_to_hex(s: &str) -> String {
    s.chars().map(|c| byte_to_hex(c as u32 as u8)).collect()
}

/// Four hex digits per UTF-16 code unit
pub fn str_to_hex_wide(s: &str) -> String {
    let mut out = String::with_capacity(s.len() * 4);
    for unit in s.encode_utf16() {
        out.push_str(&u16_to_hex(unit));
    }
    out
}

/// Drop a single trailing CRLF
pub fn trunc_returns(s: &str) -> &str {
    s.strip_suffix("\r\n").unwrap_or(s)
}

/// Normalize backslashes to slashes and drop one leading slash
pub fn trunc_lead_slash(path: &str) -> String {
    let path = path.replace('\\', "/");
    match path.strip_prefix('/') {
        Some(rest) => rest.to_string(),
        None => path,
    }
}

/// Quoted-printable encoding with soft line breaks
pub fn quoted_printable(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() + bytes.len() / 3);
    let mut line = 0usize;
    for &byte in bytes {
        if line > QP_LINE_LIMIT {
            line = 0;
            out.push_str("=\r\n");
        }
        if byte < 9 || byte == b'=' || byte > 126 {
            out.push('=');
            out.push_str(&byte_to_hex(byte));
            line += 3;
        } else {
            out.push(byte as char);
            line += 1;
        }
    }
    out
}

/// Escape the characters that break an `href` attribute
pub fn html_url(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => out.push('/'),
            '&' | '<' | '>' | '{' | '}' | ';' | '?' | ' ' | '\'' | '"' => {
                out.push('%');
                out.push_str(&byte_to_hex(c as u8));
            }
            _ => out.push(c),
        }
    }
    out
}

/// RFC 1123 date, with a numeric zone in place of `GMT` off UTC
pub fn rfc_date(datetime: &DateTime<FixedOffset>) -> String {
    let mut out = datetime.format("%a, %d %b %Y %H:%M:%S ").to_string();
    if datetime.offset().local_minus_utc() == 0 {
        out.push_str("GMT");
    } else {
        let _ = write!(out, "{}", datetime.format("%z"));
    }
    out
}

/// [`rfc_date`] for the current local time
pub fn rfc_date_now() -> String {
    rfc_date(&Local::now().into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_float_to_string() {
        assert_eq!(float_to_string(1.005, 1), "1");
        assert_eq!(float_to_string(2.5, 0), "2");
        assert_eq!(float_to_string(3.5, 0), "4");
        assert_eq!(float_to_string(0.125, 2), "0.12");
        assert_eq!(float_to_string(-0.001, 2), "0");
        assert_eq!(float_to_string(12.75, 2), "12.75");
    }

    #[test]
    fn test_hex() {
        assert_eq!(byte_to_hex(0x0A), "0A");
        assert_eq!(byte_to_hex(0xFF), "FF");
        assert_eq!(u16_to_hex(0x1F2E), "1F2E");
        assert_eq!(str_to_hex("AB"), "4142");
        assert_eq!(str_to_hex_wide("Aж"), "00410436");
    }

    #[test]
    fn test_truncation() {
        assert_eq!(trunc_returns("line\r\n"), "line");
        assert_eq!(trunc_returns("line\n"), "line\n");
        assert_eq!(trunc_lead_slash("\\img\\a.png"), "img/a.png");
        assert_eq!(trunc_lead_slash("img/a.png"), "img/a.png");
    }

    #[test]
    fn test_quoted_printable() {
        assert_eq!(quoted_printable(b"a=b"), "a=3Db");
        assert_eq!(quoted_printable(&[0x01, b'x', 0xC3]), "=01x=C3");

        let long = vec![b'a'; 80];
        let encoded = quoted_printable(&long);
        let (first, rest) = encoded.split_once("=\r\n").unwrap();
        assert_eq!(first.len(), 74);
        assert_eq!(rest.len(), 6);
    }

    #[test]
    fn test_html_url() {
        assert_eq!(html_url("a b&c"), "a%20b%26c");
        assert_eq!(html_url("dir\\file?x=1"), "dir/file%3Fx=1");
    }

    #[test]
    fn test_rfc_date() {
        let utc = FixedOffset::east_opt(0).unwrap();
        let dt = utc.with_ymd_and_hms(2024, 3, 5, 14, 7, 9).unwrap();
        assert_eq!(rfc_date(&dt), "Tue, 05 Mar 2024 14:07:09 GMT");

        let msk = FixedOffset::east_opt(3 * 3600).unwrap();
        let dt = msk.with_ymd_and_hms(2024, 3, 5, 14, 7, 9).unwrap();
        assert_eq!(rfc_date(&dt), "Tue, 05 Mar 2024 14:07:09 +0300");
    }
}
