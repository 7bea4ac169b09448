use tracing::info;

use super::classification::InvalidReason;

/// What happened to one fetched article. Exactly one per article.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// No content; nothing written
    Skipped,
    /// Over the token budget; error counter bumped, no model call
    Cancelled,
    /// Classification written
    Classified { tokens: usize, price: f64 },
    /// Model answer unusable; error counter bumped
    Invalid(InvalidReason),
}

/// Tally of a whole batch run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchReport {
    pub fetched: usize,
    pub skipped: usize,
    pub classified: usize,
    pub cancelled: usize,
    pub malformed: usize,
    pub incomplete: usize,
    /// Estimated tokens of classified articles
    pub total_tokens: usize,
    /// Dollars spent on classified articles
    pub total_price: f64,
}

impl BatchReport {
    pub fn new(fetched: usize) -> Self {
        Self {
            fetched,
            ..Default::default()
        }
    }

    pub fn record(&mut self, outcome: &Outcome) {
        match outcome {
            Outcome::Skipped => self.skipped += 1,
            Outcome::Cancelled => self.cancelled += 1,
            Outcome::Classified { tokens, price } => {
                self.classified += 1;
                self.total_tokens += tokens;
                self.total_price += price;
            }
            Outcome::Invalid(reason) if reason.is_incomplete() => self.incomplete += 1,
            Outcome::Invalid(_) => self.malformed += 1,
        }
    }

    pub fn invalid(&self) -> usize {
        self.malformed + self.incomplete
    }

    /// Articles whose error counter was bumped this run.
    pub fn errors(&self) -> usize {
        self.cancelled + self.invalid()
    }

    pub fn processed(&self) -> usize {
        self.skipped + self.classified + self.errors()
    }

    pub fn log(&self) {
        info!(
            fetched = self.fetched,
            classified = self.classified,
            skipped = self.skipped,
            cancelled = self.cancelled,
            malformed = self.malformed,
            incomplete = self.incomplete,
            total_tokens = self.total_tokens,
            total_price = self.total_price,
            "Classification batch finished"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_tallies_each_outcome() {
        let mut report = BatchReport::new(5);
        report.record(&Outcome::Skipped);
        report.record(&Outcome::Cancelled);
        report.record(&Outcome::Classified { tokens: 100, price: 0.25 });
        report.record(&Outcome::Invalid(InvalidReason::MalformedJson("eof".into())));
        report.record(&Outcome::Invalid(InvalidReason::MissingFields(vec!["tags".into()])));

        assert_eq!(report.skipped, 1);
        assert_eq!(report.cancelled, 1);
        assert_eq!(report.classified, 1);
        assert_eq!(report.malformed, 1);
        assert_eq!(report.incomplete, 1);
        assert_eq!(report.errors(), 3);
        assert_eq!(report.processed(), report.fetched);
        assert_eq!(report.total_tokens, 100);
        assert_eq!(report.total_price, 0.25);
    }

    #[test]
    fn test_wrong_shape_counts_as_malformed() {
        let mut report = BatchReport::new(1);
        report.record(&Outcome::Invalid(InvalidReason::WrongShape("array".into())));
        assert_eq!(report.malformed, 1);
        assert_eq!(report.invalid(), 1);
    }
}
