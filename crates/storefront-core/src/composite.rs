//! Composite (aggregate) API model.

use serde::{Deserialize, Serialize};

/// Summary of a recommendation inside a product aggregate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationSummary {
    /// Recommendation identifier within the product.
    pub recommendation_id: i32,
    /// Recommendation author.
    pub author: String,
    /// Rating, 1 to 5.
    pub rate: i32,
    /// Recommendation text.
    pub content: String,
}

/// Summary of a review inside a product aggregate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewSummary {
    /// Review identifier within the product.
    pub review_id: i32,
    /// Review author.
    pub author: String,
    /// Review subject line.
    pub subject: String,
    /// Review text.
    pub content: String,
}

/// Addresses of the service instances that contributed to an aggregate.
/// Diagnostics only; does not affect correctness.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceAddresses {
    /// The composite service's own address.
    pub cmp: String,
    /// Address of the replying product service instance.
    pub pro: String,
    /// Address of the replying review service instance.
    pub rev: String,
    /// Address of the replying recommendation service instance.
    pub rec: String,
}

/// The composed response: one product plus its recommendation and review
/// summaries. Both summary lists are nullable; an aggregate with zero
/// recommendations and zero reviews is valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductAggregate {
    /// Product business key.
    pub product_id: i32,
    /// Product name.
    pub name: String,
    /// Product weight.
    pub weight: i32,
    /// Recommendation summaries, if any.
    #[serde(default)]
    pub recommendations: Option<Vec<RecommendationSummary>>,
    /// Review summaries, if any.
    #[serde(default)]
    pub reviews: Option<Vec<ReviewSummary>>,
    /// Per-source address bookkeeping.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_addresses: Option<ServiceAddresses>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aggregate_deserializes_with_absent_summary_lists() {
        let json = serde_json::json!({
            "productId": 123,
            "name": "p123",
            "weight": 100
        });

        let aggregate: ProductAggregate = serde_json::from_value(json).unwrap();

        assert_eq!(aggregate.product_id, 123);
        assert!(aggregate.recommendations.is_none());
        assert!(aggregate.reviews.is_none());
        assert!(aggregate.service_addresses.is_none());
    }

    #[test]
    fn test_aggregate_serializes_summary_lists_in_camel_case() {
        let aggregate = ProductAggregate {
            product_id: 1,
            name: "p1".to_owned(),
            weight: 10,
            recommendations: Some(vec![RecommendationSummary {
                recommendation_id: 7,
                author: "a".to_owned(),
                rate: 4,
                content: "c".to_owned(),
            }]),
            reviews: Some(vec![]),
            service_addresses: Some(ServiceAddresses::default()),
        };

        let json = serde_json::to_value(&aggregate).unwrap();

        assert_eq!(json["recommendations"][0]["recommendationId"], 7);
        assert_eq!(json["reviews"].as_array().unwrap().len(), 0);
        assert_eq!(json["serviceAddresses"]["cmp"], "");
    }
}
