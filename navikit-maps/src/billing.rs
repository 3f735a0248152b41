//! Monthly usage and cost lookup.
//!
//! The one endpoint behind the HMAC-signed credential. Wire format: the
//! discriminant is `returnCode == "0"` (a string) nested under the named
//! `getProductDemandCostListResponse` envelope.

use navikit_core::{UsageLineItem, UsageReport, aggregate};
use navikit_gateway::{
    ApiFailure, ClientCause, Credential, ErrorKind, GatewayError, HttpTransport, RequestExecutor,
    ReqwestTransport, RetryPolicy,
};
use serde::Deserialize;
use tracing::{debug, info};

use crate::endpoints;
use crate::error::MapsError;

// ============================================================================
// Wire Types
// ============================================================================

/// Outer envelope.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillingResponse {
    /// The named inner envelope.
    pub get_product_demand_cost_list_response: BillingEnvelope,
}

/// Inner envelope with the string discriminant.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillingEnvelope {
    /// `"0"` on success.
    pub return_code: String,
    /// Failure detail.
    #[serde(default)]
    pub return_message: String,
    /// Raw cost records; absent when there was no usage.
    #[serde(default)]
    pub product_demand_cost_list: Vec<DemandCost>,
}

/// One raw cost record.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DemandCost {
    /// Billing month, `YYYYMM`.
    #[serde(default)]
    pub demand_month: String,
    /// Product name, e.g. `"Maps"`.
    #[serde(default)]
    pub product_name: String,
    /// Product family, e.g. `"Maps"`.
    #[serde(default)]
    pub product_category: String,
    /// Free-text service label, matched against the canonical table.
    #[serde(default)]
    pub product_item_kind_detail_name: String,
    /// Billed call count.
    #[serde(default)]
    pub use_quantity: f64,
    /// Billed cost in KRW after discounts.
    #[serde(default)]
    pub use_amount: f64,
}

impl DemandCost {
    /// Whether this record belongs to the Maps product family.
    fn is_maps_family(&self) -> bool {
        self.product_category == "Maps"
            || self.product_name.contains("Maps")
            || self.product_name.contains("Map")
    }
}

// ============================================================================
// Billing Client
// ============================================================================

/// Client for the HMAC-signed billing endpoint.
#[derive(Debug, Clone)]
pub struct BillingClient<T: HttpTransport = ReqwestTransport> {
    executor: RequestExecutor<T>,
    credential: Credential,
}

impl BillingClient<ReqwestTransport> {
    /// Creates a client over the production transport.
    ///
    /// # Errors
    ///
    /// Fails only if the TLS backend cannot be initialized.
    pub fn new(
        access_key: impl Into<String>,
        secret_key: impl Into<String>,
        policy: RetryPolicy,
    ) -> Result<Self, MapsError> {
        let executor = RequestExecutor::new(policy)?;
        Ok(Self::with_executor(
            executor,
            Credential::Signed {
                access_key: access_key.into(),
                secret_key: secret_key.into(),
            },
        ))
    }
}

impl<T: HttpTransport> BillingClient<T> {
    /// Creates a client over a custom executor and credential.
    pub fn with_executor(executor: RequestExecutor<T>, credential: Credential) -> Self {
        Self {
            executor,
            credential,
        }
    }

    /// Fetches the raw cost records for a month range (`YYYYMM` bounds,
    /// inclusive).
    ///
    /// # Errors
    ///
    /// Gateway failures (with billing-specific credential messaging), a
    /// failure envelope, or a malformed body.
    pub async fn product_demand_costs(
        &self,
        start_month: &str,
        end_month: &str,
    ) -> Result<Vec<DemandCost>, MapsError> {
        let params: Vec<(&str, String)> = vec![
            ("startMonth", start_month.to_string()),
            ("endMonth", end_month.to_string()),
            ("responseFormatType", "json".to_string()),
        ];

        debug!(start_month, end_month, "billing cost lookup");
        let response = self
            .executor
            .get(endpoints::BILLING, &params, &self.credential)
            .await
            .map_err(billing_error)?
            .ensure_success()
            .map_err(billing_error)?;
        let wire: BillingResponse = response.json()?;

        let envelope = wire.get_product_demand_cost_list_response;
        if envelope.return_code != "0" {
            return Err(MapsError::Api(format!(
                "Usage lookup failed: {}",
                envelope.return_message
            )));
        }
        Ok(envelope.product_demand_cost_list)
    }

    /// Builds the per-service usage report for one month (`YYYYMM`).
    ///
    /// Records outside the Maps product family are dropped before
    /// aggregation; so are records whose label matches no canonical
    /// service.
    ///
    /// # Errors
    ///
    /// Same as [`BillingClient::product_demand_costs`].
    pub async fn monthly_usage_report(&self, month: &str) -> Result<UsageReport, MapsError> {
        let costs = self.product_demand_costs(month, month).await?;
        let items = maps_line_items(&costs);
        info!(month, records = costs.len(), matched = items.len(), "aggregating usage");
        Ok(aggregate(&items))
    }
}

/// Pre-filters cost records to the Maps family and converts them to
/// aggregation line items.
pub fn maps_line_items(costs: &[DemandCost]) -> Vec<UsageLineItem> {
    costs
        .iter()
        .filter(|cost| cost.is_maps_family())
        .map(|cost| UsageLineItem {
            label: cost.product_item_kind_detail_name.clone(),
            quantity: cost.use_quantity,
            cost: cost.use_amount,
        })
        .collect()
}

/// Rewrites credential failures with billing-specific guidance; other
/// failures pass through unchanged.
fn billing_error(err: GatewayError) -> MapsError {
    if let GatewayError::Api(ApiFailure { kind, .. }) = &err {
        match kind {
            ErrorKind::Client(ClientCause::Auth) => {
                return MapsError::Api(
                    "Billing API authentication failed. Check the NCLOUD_ACCESS_KEY and \
                     NCLOUD_SECRET_KEY credentials."
                        .to_string(),
                );
            }
            ErrorKind::Client(ClientCause::Forbidden) => {
                return MapsError::Api(
                    "Billing API access is not allowed. Check the account permissions on the \
                     Naver Cloud Platform console."
                        .to_string(),
                );
            }
            _ => {}
        }
    }
    MapsError::Gateway(err)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn cost(category: &str, product: &str, label: &str, quantity: f64, amount: f64) -> DemandCost {
        serde_json::from_value(json!({
            "productCategory": category,
            "productName": product,
            "productItemKindDetailName": label,
            "useQuantity": quantity,
            "useAmount": amount,
        }))
        .unwrap()
    }

    #[test]
    fn envelope_parses_the_named_wrapper() {
        let wire: BillingResponse = serde_json::from_value(json!({
            "getProductDemandCostListResponse": {
                "returnCode": "0",
                "returnMessage": "success",
                "totalRows": 1,
                "productDemandCostList": [{
                    "demandMonth": "202401",
                    "productCategory": "Maps",
                    "productName": "Maps",
                    "productItemKindDetailName": "Dynamic Map",
                    "useQuantity": 100.0,
                    "useAmount": 0.0
                }]
            }
        }))
        .unwrap();

        let envelope = wire.get_product_demand_cost_list_response;
        assert_eq!(envelope.return_code, "0");
        assert_eq!(envelope.product_demand_cost_list.len(), 1);
    }

    #[test]
    fn non_maps_records_are_filtered_out() {
        let costs = vec![
            cost("Maps", "Maps", "Geocoding", 10.0, 1.0),
            cost("Compute", "Server", "Standard vCPU", 720.0, 50_000.0),
            cost("AI", "Maps SDK", "Static Map", 5.0, 0.0),
        ];
        let items = maps_line_items(&costs);
        assert_eq!(items.len(), 2);
        assert!(items.iter().all(|item| item.label != "Standard vCPU"));
    }

    #[test]
    fn line_items_feed_the_aggregator() {
        let costs = vec![
            cost("Maps", "Maps", "Dynamic Map", 4_800_000.0, 1000.0),
            cost("Maps", "Maps", "Static Map X", 100.0, 5.0),
        ];
        let report = aggregate(&maps_line_items(&costs));
        assert_eq!(report.total_cost, 1005.0);
        assert_eq!(report.warnings.len(), 1);
    }

    #[test]
    fn auth_failures_get_billing_guidance() {
        let err = billing_error(GatewayError::Api(ApiFailure::from_status(401, "denied")));
        assert!(matches!(err, MapsError::Api(message) if message.contains("NCLOUD_ACCESS_KEY")));

        let err = billing_error(GatewayError::Api(ApiFailure::from_status(500, "oops")));
        assert!(matches!(err, MapsError::Gateway(_)));
    }
}
