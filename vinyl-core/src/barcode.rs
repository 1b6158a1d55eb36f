/// Strip whitespace and hyphens from a user-entered barcode.
///
/// No checksum validation: Discogs stores barcodes as printed, including
/// ones that would fail an EAN/UPC check.
pub fn normalize_barcode(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_spaces_and_hyphens() {
        assert_eq!(normalize_barcode("6 02537-254893"), "602537254893");
        assert_eq!(normalize_barcode(" 0-77774-6446-2 "), "07777464462");
    }

    #[test]
    fn keeps_other_characters() {
        assert_eq!(normalize_barcode("LC 0309"), "LC0309");
    }

    #[test]
    fn blank_input_normalizes_to_empty() {
        assert_eq!(normalize_barcode(" - \t"), "");
    }
}
