//! Usage aggregation.
//!
//! Turns the raw billing line items for one month into a per-service report:
//! summed usage and cost, usage rate against the monthly free quota, and
//! warnings for services running close to their limit.

use serde::{Deserialize, Serialize};

use super::service::{ServiceKind, WARNING_THRESHOLD};

// ============================================================================
// Line Items
// ============================================================================

/// One raw billing record, as delivered by the billing endpoint.
///
/// The label is free text; it is resolved to a [`ServiceKind`] by substring
/// matching during aggregation. Items whose label matches no service are
/// dropped rather than failed, so partial billing data never blocks a report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsageLineItem {
    /// Free-text service label from the provider.
    pub label: String,
    /// Billed call count.
    pub quantity: f64,
    /// Billed cost in KRW.
    pub cost: f64,
}

// ============================================================================
// Aggregated Output
// ============================================================================

/// Aggregated usage for one canonical service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceUsage {
    /// The canonical service.
    pub service: ServiceKind,
    /// Total billed calls this month.
    pub usage: f64,
    /// Monthly free-tier quota.
    pub free_limit: u64,
    /// Usage as a percentage of the free quota, rounded to one decimal.
    pub rate_percent: f64,
    /// Total billed cost in KRW.
    pub cost: f64,
}

/// Warning for a service whose usage rate is at or above the threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsageWarning {
    /// The service concerned.
    pub service: ServiceKind,
    /// Human-readable warning text.
    pub message: String,
}

/// Full aggregation output for one month.
///
/// Always contains exactly one [`ServiceUsage`] per entry in
/// [`ServiceKind::ALL`], even for services with no matched line items.
/// Recomputed from scratch on every call; nothing accumulates across calls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsageReport {
    /// Per-service usage, sorted by rate descending.
    pub services: Vec<ServiceUsage>,
    /// Warnings for services at or above the warning threshold.
    pub warnings: Vec<UsageWarning>,
    /// Total cost across all services, in KRW.
    pub total_cost: f64,
}

// ============================================================================
// Aggregation
// ============================================================================

/// Aggregates raw billing line items into a per-service usage report.
///
/// Each item is resolved to a service by first-match substring containment
/// over the fixed table; unmatched items are dropped. Every service in the
/// table appears in the output regardless of whether anything matched. The
/// result is sorted by usage rate descending; ties keep table order.
pub fn aggregate(items: &[UsageLineItem]) -> UsageReport {
    let mut sums: [(f64, f64); ServiceKind::ALL.len()] = Default::default();

    for item in items {
        let Some(service) = ServiceKind::from_label(&item.label) else {
            continue;
        };
        let slot = service as usize;
        sums[slot].0 += item.quantity;
        sums[slot].1 += item.cost;
    }

    let mut services = Vec::with_capacity(ServiceKind::ALL.len());
    let mut warnings = Vec::new();
    let mut total_cost = 0.0;

    for (slot, service) in ServiceKind::ALL.into_iter().enumerate() {
        let (usage, cost) = sums[slot];
        let free_limit = service.free_limit();
        let rate = if free_limit > 0 {
            usage / free_limit as f64 * 100.0
        } else {
            0.0
        };

        services.push(ServiceUsage {
            service,
            usage,
            free_limit,
            rate_percent: (rate * 10.0).round() / 10.0,
            cost,
        });
        total_cost += cost;

        // Threshold check uses the unrounded rate.
        if rate >= WARNING_THRESHOLD {
            warnings.push(UsageWarning {
                service,
                message: format!(
                    "{service} usage is at {rate:.1}% of the free tier. Watch the limit."
                ),
            });
        }
    }

    // Stable sort keeps table order for equal rates.
    services.sort_by(|a, b| b.rate_percent.total_cmp(&a.rate_percent));

    UsageReport {
        services,
        warnings,
        total_cost,
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn item(label: &str, quantity: f64, cost: f64) -> UsageLineItem {
        UsageLineItem {
            label: label.to_string(),
            quantity,
            cost,
        }
    }

    #[test]
    fn aggregates_against_the_standard_table() {
        let items = [
            item("Dynamic Map Usage", 4_800_000.0, 1000.0),
            item("Static Map X", 100.0, 5.0),
        ];
        let report = aggregate(&items);

        let dynamic = report
            .services
            .iter()
            .find(|s| s.service == ServiceKind::DynamicMap)
            .unwrap();
        assert_eq!(dynamic.usage, 4_800_000.0);
        assert_eq!(dynamic.rate_percent, 80.0);
        assert_eq!(dynamic.cost, 1000.0);

        let static_map = report
            .services
            .iter()
            .find(|s| s.service == ServiceKind::StaticMap)
            .unwrap();
        assert_eq!(static_map.usage, 100.0);
        assert_eq!(static_map.rate_percent, 0.0);

        assert_eq!(report.warnings.len(), 1);
        assert_eq!(report.warnings[0].service, ServiceKind::DynamicMap);
        assert_eq!(report.total_cost, 1005.0);
    }

    #[test]
    fn every_service_is_present_even_with_no_items() {
        let report = aggregate(&[]);
        assert_eq!(report.services.len(), ServiceKind::ALL.len());
        assert!(report.services.iter().all(|s| s.usage == 0.0));
        assert!(report.warnings.is_empty());
        assert_eq!(report.total_cost, 0.0);
    }

    #[test]
    fn zero_rate_ties_keep_table_order() {
        let report = aggregate(&[]);
        let order: Vec<ServiceKind> = report.services.iter().map(|s| s.service).collect();
        assert_eq!(order, ServiceKind::ALL.to_vec());
    }

    #[test]
    fn sorts_by_rate_descending() {
        let items = [
            item("Geocoding", 300_000.0, 0.0),
            item("Directions 15", 2_900.0, 120.0),
        ];
        let report = aggregate(&items);
        // Directions 15: 2900/3000 = 96.7%, Geocoding: 10%
        assert_eq!(report.services[0].service, ServiceKind::Directions15);
        assert_eq!(report.services[0].rate_percent, 96.7);
        assert_eq!(report.services[1].service, ServiceKind::Geocoding);
    }

    #[test]
    fn unmatched_items_are_dropped() {
        let items = [
            item("Unrelated Product", 9_999_999.0, 777.0),
            item("Geocoding", 10.0, 1.0),
        ];
        let report = aggregate(&items);
        assert_eq!(report.total_cost, 1.0);
        assert!(report.services.iter().all(|s| s.usage <= 10.0));
    }

    #[test]
    fn repeated_labels_sum_into_one_service() {
        let items = [
            item("Directions 5 (KR)", 30_000.0, 50.0),
            item("Directions 5 (Global)", 15_000.0, 25.0),
        ];
        let report = aggregate(&items);
        let directions = report
            .services
            .iter()
            .find(|s| s.service == ServiceKind::Directions5)
            .unwrap();
        assert_eq!(directions.usage, 45_000.0);
        assert_eq!(directions.cost, 75.0);
        // 45000/60000 = 75% >= 70% threshold
        assert_eq!(report.warnings.len(), 1);
    }

    #[test]
    fn aggregation_is_idempotent() {
        let items = [
            item("Dynamic Map", 100.0, 2.0),
            item("Static Map", 200.0, 4.0),
        ];
        let first = aggregate(&items);
        let second = aggregate(&items);
        assert_eq!(first, second);
    }

    #[test]
    fn reverse_geocoding_items_count_toward_geocoding() {
        // First-match substring semantics: the "Geocoding" table entry wins.
        let items = [item("Reverse Geocoding", 50.0, 3.0)];
        let report = aggregate(&items);
        let geocoding = report
            .services
            .iter()
            .find(|s| s.service == ServiceKind::Geocoding)
            .unwrap();
        assert_eq!(geocoding.usage, 50.0);
        let reverse = report
            .services
            .iter()
            .find(|s| s.service == ServiceKind::ReverseGeocoding)
            .unwrap();
        assert_eq!(reverse.usage, 0.0);
    }
}
