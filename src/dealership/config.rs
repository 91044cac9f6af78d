//! Scoring parameters

/// Score deltas applied by sales and complaints
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DealershipConfig {
    /// Score added per sale
    pub sale_points: i64,

    /// Complaint penalty numerator: penalty = complaint_base / months
    pub complaint_base: i64,
}

impl DealershipConfig {
    /// Create config with explicit deltas
    pub fn new(sale_points: i64, complaint_base: i64) -> Self {
        Self {
            sale_points,
            complaint_base,
        }
    }

    /// Penalty for a complaint filed `months` after purchase
    ///
    /// Integer division: late complaints may cost nothing.
    pub fn complaint_penalty(&self, months: u32) -> i64 {
        self.complaint_base / i64::from(months.max(1))
    }
}

impl Default for DealershipConfig {
    fn default() -> Self {
        Self::new(10, 100)
    }
}
