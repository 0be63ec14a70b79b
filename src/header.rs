use crate::cell::cell_at;
use crate::schema::{ColumnRole, HeaderVocabulary};

/// Maps day-block header text to a [`ColumnRole`] by keyword containment.
pub struct HeaderClassifier<'a> {
    vocabulary: &'a HeaderVocabulary,
}

impl<'a> HeaderClassifier<'a> {
    pub fn new(vocabulary: &'a HeaderVocabulary) -> Self {
        Self { vocabulary }
    }

    /// Matches the whole header text. A day label in the first column of a
    /// block is left in place; day tokens never contain vocabulary words.
    pub fn classify(&self, header: &str) -> ColumnRole {
        let text = header.trim().to_lowercase();
        if text.is_empty() {
            return ColumnRole::Ignored;
        }

        for (role, keywords) in self.vocabulary.in_priority_order() {
            if keywords
                .iter()
                .any(|keyword| text.contains(keyword.trim().to_lowercase().as_str()))
            {
                return role;
            }
        }

        ColumnRole::Ignored
    }

    /// Roles for every column of a block starting at `start_column`.
    pub fn classify_block(
        &self,
        header_row: &[String],
        start_column: usize,
        width: usize,
    ) -> Vec<ColumnRole> {
        (0..width)
            .map(|position| self.classify(cell_at(header_row, start_column + position)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thai_headers() {
        let vocabulary = HeaderVocabulary::default();
        let classifier = HeaderClassifier::new(&vocabulary);

        assert_eq!(classifier.classify("ยกมา"), ColumnRole::BroughtForward);
        assert_eq!(classifier.classify("รับเข้า"), ColumnRole::Received);
        assert_eq!(classifier.classify("ขายเงินสด"), ColumnRole::Sold);
        assert_eq!(classifier.classify("ตัดสต็อก"), ColumnRole::Sold);
        assert_eq!(classifier.classify("ทิ้ง"), ColumnRole::Waste);
        assert_eq!(classifier.classify("หมายเหตุ"), ColumnRole::Ignored);
    }

    #[test]
    fn test_english_headers_are_case_insensitive() {
        let vocabulary = HeaderVocabulary::default();
        let classifier = HeaderClassifier::new(&vocabulary);

        assert_eq!(classifier.classify("Brought Forward"), ColumnRole::BroughtForward);
        assert_eq!(classifier.classify("RECEIVED"), ColumnRole::Received);
        assert_eq!(classifier.classify("Sold (transfer)"), ColumnRole::Sold);
        assert_eq!(classifier.classify("Waste"), ColumnRole::Waste);
        assert_eq!(classifier.classify(""), ColumnRole::Ignored);
        assert_eq!(classifier.classify("   "), ColumnRole::Ignored);
    }

    #[test]
    fn test_priority_order() {
        let vocabulary = HeaderVocabulary::default();
        let classifier = HeaderClassifier::new(&vocabulary);

        // "total" is a received keyword but sold outranks it.
        assert_eq!(classifier.classify("Total sold"), ColumnRole::Sold);
        assert_eq!(classifier.classify("รวมขาย"), ColumnRole::Sold);
        assert_eq!(classifier.classify("Total waste"), ColumnRole::Waste);
        assert_eq!(classifier.classify("Total"), ColumnRole::Received);
    }

    #[test]
    fn test_day_label_stays_in_block_start_header() {
        let vocabulary = HeaderVocabulary::default();
        let classifier = HeaderClassifier::new(&vocabulary);

        assert_eq!(classifier.classify("1 Mar brought forward"), ColumnRole::BroughtForward);
        assert_eq!(classifier.classify("5 ยกมา"), ColumnRole::BroughtForward);
        assert_eq!(classifier.classify("1 รวม"), ColumnRole::Received);
        assert_eq!(classifier.classify("1 มี.ค."), ColumnRole::Ignored);
        assert_eq!(classifier.classify("3 Mar"), ColumnRole::Ignored);
    }

    #[test]
    fn test_injected_vocabulary() {
        let vocabulary = HeaderVocabulary {
            brought_forward: vec!["Opening".to_string()],
            received: vec!["in".to_string()],
            sold: vec!["out".to_string()],
            waste: vec!["spoil".to_string()],
        };
        let classifier = HeaderClassifier::new(&vocabulary);

        assert_eq!(classifier.classify("opening stock"), ColumnRole::BroughtForward);
        assert_eq!(classifier.classify("spoilage"), ColumnRole::Waste);
        assert_eq!(classifier.classify("ขาย"), ColumnRole::Ignored);
    }

    #[test]
    fn test_classify_block() {
        let vocabulary = HeaderVocabulary::default();
        let classifier = HeaderClassifier::new(&vocabulary);
        let header: Vec<String> = ["x", "1 Mar ยกมา", "รับ", "ขาย"]
            .iter()
            .map(|s| s.to_string())
            .collect();

        let roles = classifier.classify_block(&header, 1, 4);
        assert_eq!(
            roles,
            vec![
                ColumnRole::BroughtForward,
                ColumnRole::Received,
                ColumnRole::Sold,
                ColumnRole::Ignored
            ]
        );
    }
}
