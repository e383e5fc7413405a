use altum_client::PropertyRecord;

/// `market_status` of a listing that is still for sale
pub const STATUS_AVAILABLE: &str = "Beschikbaar";
/// `market_status` of a sold listing
pub const STATUS_SOLD: &str = "Verkocht";

/// Summary of one page of listings
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingStats {
    pub total: usize,
    pub with_price: usize,
    pub available: usize,
    pub sold: usize,
    pub average_price: Option<i64>,
    pub min_price: Option<i64>,
    pub max_price: Option<i64>,
}

impl ListingStats {
    pub fn from_records(records: &[PropertyRecord]) -> Self {
        let prices: Vec<i64> = records.iter().filter_map(PropertyRecord::asking_price).collect();
        let status_count = |wanted: &str| {
            records
                .iter()
                .filter(|record| record.market_status().as_deref() == Some(wanted))
                .count()
        };

        let average_price = if prices.is_empty() {
            None
        } else {
            let sum: i128 = prices.iter().map(|&p| p as i128).sum();
            Some((sum as f64 / prices.len() as f64).round() as i64)
        };

        Self {
            total: records.len(),
            with_price: prices.len(),
            available: status_count(STATUS_AVAILABLE),
            sold: status_count(STATUS_SOLD),
            average_price,
            min_price: prices.iter().copied().min(),
            max_price: prices.iter().copied().max(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_stats_over_mixed_listings() {
        let records: Vec<PropertyRecord> = serde_json::from_value(json!([
            {"asking_price": 500000, "market_status": "Beschikbaar"},
            {"asking_price": "400000", "market_status": "Verkocht"},
            {"asking_price": null, "market_status": "Beschikbaar"},
            {"market_status": "Onder bod"}
        ]))
        .unwrap();

        let stats = ListingStats::from_records(&records);
        assert_eq!(stats.total, 4);
        assert_eq!(stats.with_price, 2);
        assert_eq!(stats.available, 2);
        assert_eq!(stats.sold, 1);
        assert_eq!(stats.average_price, Some(450000));
        assert_eq!(stats.min_price, Some(400000));
        assert_eq!(stats.max_price, Some(500000));
    }

    #[test]
    fn test_stats_without_prices() {
        let records: Vec<PropertyRecord> =
            serde_json::from_value(json!([{"street": "Kerkstraat"}])).unwrap();

        let stats = ListingStats::from_records(&records);
        assert_eq!(stats.total, 1);
        assert_eq!(stats.with_price, 0);
        assert_eq!(stats.average_price, None);
        assert_eq!(stats.min_price, None);
    }

    #[test]
    fn test_average_rounds() {
        let records: Vec<PropertyRecord> =
            serde_json::from_value(json!([{"asking_price": 1}, {"asking_price": 2}])).unwrap();
        assert_eq!(ListingStats::from_records(&records).average_price, Some(2));
    }
}
