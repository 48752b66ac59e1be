use crate::error::ScanError;

/// Parse a port specification into the list of TCP ports (1..=65535) to scan.
///
/// Supported forms, after all whitespace is stripped:
/// - single port: `80`
/// - comma-separated list: `22,80,443` (input order, duplicates kept)
/// - inclusive range: `8000-8010` (ascending)
///
/// A specification containing `-` is always treated as a range, so mixed forms
/// such as `1-5,7` are rejected.
pub fn parse_ports_spec(spec: &str) -> Result<Vec<u16>, ScanError> {
    let spec: String = spec.chars().filter(|c| !c.is_whitespace()).collect();

    if spec.contains('-') {
        let bounds: Vec<&str> = spec.split('-').collect();
        if bounds.len() > 2 {
            return Err(ScanError::InvalidRange(spec));
        }
        let start = parse_port(bounds[0])?;
        let end = parse_port(bounds[1])?;
        if start > end {
            return Err(ScanError::RangeStartAfterEnd { start, end });
        }
        return Ok((start..=end).collect());
    }

    if spec.contains(',') {
        return spec.split(',').map(parse_port).collect();
    }

    Ok(vec![parse_port(&spec)?])
}

/// Parse a single port token, rejecting port 0 and anything above 65535.
///
/// Only plain decimal digits are accepted; a sign such as `+80` is malformed.
pub fn parse_port(s: &str) -> Result<u16, ScanError> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ScanError::InvalidPort {
            value: s.to_string(),
            source: None,
        });
    }
    let val: u32 = s.parse::<u32>().map_err(|e| ScanError::InvalidPort {
        value: s.to_string(),
        source: Some(e),
    })?;
    if val == 0 || val > u32::from(u16::MAX) {
        return Err(ScanError::PortOutOfRange(u64::from(val)));
    }
    Ok(val as u16)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_single_port() {
        assert_eq!(parse_ports_spec("80").unwrap(), vec![80]);
        assert_eq!(parse_ports_spec(" 443 ").unwrap(), vec![443]);
    }

    #[test]
    fn parse_list_keeps_order_and_duplicates() {
        let ports = parse_ports_spec("443, 22,80,22").unwrap();
        assert_eq!(ports, vec![443, 22, 80, 22]);
    }

    #[test]
    fn parse_inclusive_range() {
        assert_eq!(parse_ports_spec("8000 - 8003").unwrap(), vec![8000, 8001, 8002, 8003]);
        assert_eq!(parse_ports_spec("7-7").unwrap(), vec![7]);
        assert_eq!(parse_ports_spec("1-1024").unwrap().len(), 1024);
        assert_eq!(parse_ports_spec("65535-65535").unwrap(), vec![65535]);
    }

    #[test]
    fn out_of_range_values_error() {
        assert!(matches!(parse_ports_spec("0"), Err(ScanError::PortOutOfRange(0))));
        assert!(matches!(
            parse_ports_spec("70000"),
            Err(ScanError::PortOutOfRange(70000))
        ));
        assert!(matches!(
            parse_ports_spec("80,65536"),
            Err(ScanError::PortOutOfRange(65536))
        ));
    }

    #[test]
    fn malformed_values_error() {
        for spec in ["abc", "", "80,", "8o", "99999999999", "+80", "+1-+3", "80,+81"] {
            assert!(
                matches!(parse_ports_spec(spec), Err(ScanError::InvalidPort { .. })),
                "spec {spec:?} should be rejected as malformed"
            );
        }
    }

    #[test]
    fn malformed_ranges_error() {
        assert!(matches!(parse_ports_spec("1-2-3"), Err(ScanError::InvalidRange(_))));
        assert!(matches!(
            parse_ports_spec("5-3"),
            Err(ScanError::RangeStartAfterEnd { start: 5, end: 3 })
        ));
        assert!(matches!(parse_ports_spec("1-5,7"), Err(ScanError::InvalidPort { .. })));
        assert!(matches!(parse_ports_spec("-80"), Err(ScanError::InvalidPort { .. })));
    }

    #[test]
    fn overflowing_value_keeps_parse_source() {
        match parse_port("99999999999") {
            Err(ScanError::InvalidPort { source, .. }) => assert!(source.is_some()),
            other => panic!("unexpected result: {other:?}"),
        }
        match parse_port("+80") {
            Err(ScanError::InvalidPort { value, source }) => {
                assert_eq!(value, "+80");
                assert!(source.is_none());
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn out_of_range_message_names_valid_bounds() {
        let err = parse_ports_spec("0").unwrap_err();
        assert!(err.to_string().starts_with("TCP port out of range"));
    }
}
