use alloy_primitives::Address;

/// Parses a hex wallet address.
///
/// 40 hex digits with an optional `0x` prefix. Single-case input is taken as-is,
/// mixed case has to carry a valid EIP-55 checksum. ICAP (`XE..`) addresses are not
/// accepted. The returned [`Address`] is the normalized key used for cooldown tracking.
pub fn parse_address(input: &str) -> Option<Address> {
    let digits = input.strip_prefix("0x").unwrap_or(input);
    if digits.len() != 40 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }

    let has_lower = digits.bytes().any(|b| b.is_ascii_lowercase());
    let has_upper = digits.bytes().any(|b| b.is_ascii_uppercase());
    if has_lower && has_upper {
        // chain_id None: plain EIP-55
        Address::parse_checksummed(format!("0x{digits}"), None).ok()
    } else {
        digits.parse().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::address;

    const ACCOUNT: Address = address!("0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266");

    #[test]
    fn accepts_checksummed() {
        assert_eq!(
            parse_address("0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266"),
            Some(ACCOUNT)
        );
    }

    #[test]
    fn accepts_single_case_without_checksum() {
        assert_eq!(
            parse_address("0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266"),
            Some(ACCOUNT)
        );
        assert_eq!(
            parse_address("0xF39FD6E51AAD88F6F4CE6AB8827279CFFFB92266"),
            Some(ACCOUNT)
        );
        assert_eq!(
            parse_address("f39fd6e51aad88f6f4ce6ab8827279cfffb92266"),
            Some(ACCOUNT)
        );
    }

    #[test]
    fn rejects_bad_checksum() {
        // last two letters flipped in case
        assert_eq!(
            parse_address("0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266".replace("Fb", "fB").as_str()),
            None
        );
    }

    #[test]
    fn rejects_malformed() {
        for input in [
            "",
            "0x",
            "not-an-address",
            "0xf39fd6e51aad88f6f4ce6ab8827279cfffb9226",
            "0xf39fd6e51aad88f6f4ce6ab8827279cfffb922666",
            "0xg39fd6e51aad88f6f4ce6ab8827279cfffb92266",
            " 0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266",
            "0Xf39fd6e51aad88f6f4ce6ab8827279cfffb92266",
            // ICAP form
            "XE7338O073KYGTWWZN0F2WZ0R8PX5ZPPZS",
        ] {
            assert_eq!(parse_address(input), None, "{input:?}");
        }
    }
}
