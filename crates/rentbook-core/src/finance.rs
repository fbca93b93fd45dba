//! Financial calculator.
//!
//! Pure functions over in-memory tenant collections. Balances are
//! always recomputed from the payment log; nothing here is cached or
//! persisted. All month/day comparisons work on calendar dates
//! ([`chrono::NaiveDate`]), so results do not depend on the timezone of
//! the machine running them.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use uuid::Uuid;

use crate::models::tenant::{Payment, PaymentMethod, Tenant};

/// Payments dated after this day of the month count as late.
pub const GRACE_DAY: u32 = 5;

/// Number of calendar months covered by the dashboard trend.
pub const TREND_MONTHS: u32 = 6;

/// Sum of all payments recorded for a tenant.
pub fn total_paid(tenant: &Tenant) -> f64 {
    tenant.payments.iter().map(|p| p.amount).sum()
}

/// Amount the tenant currently owes (positive), has overpaid
/// (negative), or zero when settled. A tenant with no payments owes the
/// full monthly rent.
pub fn balance(tenant: &Tenant) -> f64 {
    tenant.monthly_rent - total_paid(tenant)
}

/// Payments of one calendar month, in their original order.
#[derive(Debug, Clone, Serialize)]
pub struct MonthlyGroup {
    /// Sortable `YYYY-MM` key.
    pub key: String,
    /// Human-readable month, e.g. `August 2025`.
    pub display_name: String,
    pub payments: Vec<Payment>,
    pub total: f64,
}

/// Group payments by calendar month, most recent month first. Within a
/// month the original payment order is preserved.
pub fn group_payments_by_month(payments: &[Payment]) -> Vec<MonthlyGroup> {
    let mut grouped: BTreeMap<String, MonthlyGroup> = BTreeMap::new();

    for payment in payments {
        let key = month_key(payment.date);
        let group = grouped.entry(key.clone()).or_insert_with(|| MonthlyGroup {
            key,
            display_name: payment.date.format("%B %Y").to_string(),
            payments: Vec::new(),
            total: 0.0,
        });
        group.payments.push(payment.clone());
        group.total += payment.amount;
    }

    grouped.into_values().rev().collect()
}

/// A payment annotated with the tenant it belongs to.
#[derive(Debug, Clone, Serialize)]
pub struct TenantPayment {
    pub tenant_id: Uuid,
    pub tenant_name: String,
    pub payment: Payment,
}

/// A current-month payment made after the grace day.
#[derive(Debug, Clone, Serialize)]
pub struct LatePayment {
    pub tenant_id: Uuid,
    pub tenant_name: String,
    pub payment: Payment,
    pub days_late: u32,
}

/// A tenant with an outstanding balance.
#[derive(Debug, Clone, Serialize)]
pub struct PendingTenant {
    pub tenant_id: Uuid,
    pub name: String,
    pub apartment: String,
    pub monthly_rent: f64,
    pub balance: f64,
}

/// One month of the collection trend.
#[derive(Debug, Clone, Serialize)]
pub struct TrendPoint {
    /// Short label, e.g. `Aug 25`.
    pub month: String,
    pub amount: f64,
}

/// Aggregate collection figures for one reference month.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardSummary {
    pub total_monthly_rent: f64,
    pub total_collected: f64,
    /// Percentage of expected rent collected this month; 0 when no
    /// rent is expected.
    pub collection_rate: f64,
    pub current_month_payments: Vec<TenantPayment>,
    pub pending_tenants: Vec<PendingTenant>,
    pub late_payments: Vec<LatePayment>,
    pub payment_method_totals: BTreeMap<PaymentMethod, f64>,
    /// Collected totals for the [`TREND_MONTHS`] months ending at the
    /// reference month, oldest first.
    pub monthly_trend: Vec<TrendPoint>,
}

/// Compute the dashboard for the calendar month containing
/// `reference_date`.
pub fn dashboard_summary(tenants: &[Tenant], reference_date: NaiveDate) -> DashboardSummary {
    let ref_year = reference_date.year();
    let ref_month = reference_date.month();

    let current_month_payments: Vec<TenantPayment> = tenants
        .iter()
        .flat_map(|tenant| {
            tenant
                .payments
                .iter()
                .filter(|p| p.date.year() == ref_year && p.date.month() == ref_month)
                .map(|p| TenantPayment {
                    tenant_id: tenant.id,
                    tenant_name: tenant.name.clone(),
                    payment: p.clone(),
                })
        })
        .collect();

    let total_monthly_rent: f64 = tenants.iter().map(|t| t.monthly_rent).sum();
    let total_collected: f64 = current_month_payments
        .iter()
        .map(|p| p.payment.amount)
        .sum();
    let collection_rate = if total_monthly_rent > 0.0 {
        total_collected / total_monthly_rent * 100.0
    } else {
        0.0
    };

    let pending_tenants: Vec<PendingTenant> = tenants
        .iter()
        .filter(|t| balance(t) > 0.0)
        .map(|t| PendingTenant {
            tenant_id: t.id,
            name: t.name.clone(),
            apartment: t.apartment.clone(),
            monthly_rent: t.monthly_rent,
            balance: balance(t),
        })
        .collect();

    let late_payments: Vec<LatePayment> = current_month_payments
        .iter()
        .filter(|p| p.payment.date.day() > GRACE_DAY)
        .map(|p| LatePayment {
            tenant_id: p.tenant_id,
            tenant_name: p.tenant_name.clone(),
            payment: p.payment.clone(),
            days_late: p.payment.date.day() - GRACE_DAY,
        })
        .collect();

    let mut payment_method_totals: BTreeMap<PaymentMethod, f64> = BTreeMap::new();
    for p in &current_month_payments {
        *payment_method_totals.entry(p.payment.method).or_insert(0.0) += p.payment.amount;
    }

    let mut monthly_trend = Vec::with_capacity(TREND_MONTHS as usize);
    for back in (0..TREND_MONTHS).rev() {
        let (year, month) = months_back(ref_year, ref_month, back);
        let amount: f64 = tenants
            .iter()
            .flat_map(|t| &t.payments)
            .filter(|p| p.date.year() == year && p.date.month() == month)
            .map(|p| p.amount)
            .sum();
        monthly_trend.push(TrendPoint {
            month: trend_label(year, month),
            amount,
        });
    }

    DashboardSummary {
        total_monthly_rent,
        total_collected,
        collection_rate,
        current_month_payments,
        pending_tenants,
        late_payments,
        payment_method_totals,
        monthly_trend,
    }
}

fn month_key(date: NaiveDate) -> String {
    format!("{:04}-{:02}", date.year(), date.month())
}

/// The (year, month) pair `back` calendar months before the given one.
fn months_back(year: i32, month: u32, back: u32) -> (i32, u32) {
    let total = year * 12 + month as i32 - 1 - back as i32;
    (total.div_euclid(12), (total.rem_euclid(12) + 1) as u32)
}

fn trend_label(year: i32, month: u32) -> String {
    match NaiveDate::from_ymd_opt(year, month, 1) {
        Some(first) => first.format("%b %y").to_string(),
        None => format!("{year:04}-{month:02}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use crate::models::tenant::{PaymentMethod, RentChange};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn payment(amount: f64, date: NaiveDate, method: PaymentMethod) -> Payment {
        Payment {
            id: Uuid::new_v4(),
            amount,
            date,
            method,
            paid_by: "tester".into(),
            photo: None,
            created_at: Utc::now(),
        }
    }

    fn tenant(name: &str, monthly_rent: f64, payments: Vec<Payment>) -> Tenant {
        Tenant {
            id: Uuid::new_v4(),
            owner_user_id: Uuid::new_v4(),
            name: name.into(),
            apartment: "1A".into(),
            unit_type: "1-bed".into(),
            monthly_rent,
            notes: String::new(),
            payments,
            rent_history: Vec::<RentChange>::new(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn balance_with_no_payments_is_full_rent() {
        let t = tenant("Joe", 1000.0, vec![]);
        assert_eq!(balance(&t), 1000.0);
    }

    #[test]
    fn balance_is_rent_minus_payments() {
        let t = tenant(
            "Joe",
            1000.0,
            vec![
                payment(400.0, date(2025, 8, 2), PaymentMethod::Cash),
                payment(100.0, date(2025, 8, 10), PaymentMethod::Check),
            ],
        );
        assert_eq!(total_paid(&t), 500.0);
        assert_eq!(balance(&t), 500.0);
    }

    #[test]
    fn overpaid_tenant_has_negative_balance() {
        let t = tenant(
            "Ann",
            800.0,
            vec![payment(1000.0, date(2025, 8, 1), PaymentMethod::BankTransfer)],
        );
        assert_eq!(balance(&t), -200.0);
    }

    #[test]
    fn grouping_splits_by_month_most_recent_first() {
        let payments = vec![
            payment(100.0, date(2025, 7, 3), PaymentMethod::Cash),
            payment(200.0, date(2025, 8, 1), PaymentMethod::Cash),
            payment(50.0, date(2025, 7, 20), PaymentMethod::Check),
        ];

        let groups = group_payments_by_month(&payments);
        assert_eq!(groups.len(), 2);

        assert_eq!(groups[0].key, "2025-08");
        assert_eq!(groups[0].display_name, "August 2025");
        assert_eq!(groups[0].total, 200.0);

        assert_eq!(groups[1].key, "2025-07");
        assert_eq!(groups[1].total, 150.0);
        // Original order preserved within the month.
        assert_eq!(groups[1].payments[0].amount, 100.0);
        assert_eq!(groups[1].payments[1].amount, 50.0);
    }

    #[test]
    fn group_totals_match_their_payments() {
        let payments = vec![
            payment(10.0, date(2024, 12, 5), PaymentMethod::Cash),
            payment(20.0, date(2025, 1, 5), PaymentMethod::Cash),
            payment(30.0, date(2025, 1, 6), PaymentMethod::Cash),
        ];
        for group in group_payments_by_month(&payments) {
            let sum: f64 = group.payments.iter().map(|p| p.amount).sum();
            assert_eq!(group.total, sum);
        }
    }

    #[test]
    fn collection_rate_is_zero_without_expected_rent() {
        // Even with money collected, a zero-rent portfolio rates 0.
        let t = tenant(
            "Free",
            0.0,
            vec![payment(500.0, date(2025, 8, 1), PaymentMethod::Cash)],
        );
        let summary = dashboard_summary(&[t], date(2025, 8, 15));
        assert_eq!(summary.total_collected, 500.0);
        assert_eq!(summary.collection_rate, 0.0);
    }

    #[test]
    fn collection_rate_percentage() {
        let t = tenant(
            "Joe",
            1000.0,
            vec![payment(250.0, date(2025, 8, 3), PaymentMethod::Cash)],
        );
        let summary = dashboard_summary(&[t], date(2025, 8, 15));
        assert_eq!(summary.collection_rate, 25.0);
    }

    #[test]
    fn current_month_excludes_other_months() {
        let t = tenant(
            "Joe",
            1000.0,
            vec![
                payment(400.0, date(2025, 8, 2), PaymentMethod::Cash),
                payment(300.0, date(2025, 7, 2), PaymentMethod::Cash),
                // Same month number, different year.
                payment(200.0, date(2024, 8, 2), PaymentMethod::Cash),
            ],
        );
        let summary = dashboard_summary(&[t], date(2025, 8, 15));
        assert_eq!(summary.current_month_payments.len(), 1);
        assert_eq!(summary.total_collected, 400.0);
    }

    #[test]
    fn payments_on_grace_day_are_not_late() {
        let t = tenant(
            "Joe",
            1000.0,
            vec![
                payment(100.0, date(2025, 8, 5), PaymentMethod::Cash),
                payment(100.0, date(2025, 8, 6), PaymentMethod::Cash),
                payment(100.0, date(2025, 8, 20), PaymentMethod::Cash),
            ],
        );
        let summary = dashboard_summary(&[t], date(2025, 8, 25));
        assert_eq!(summary.late_payments.len(), 2);
        assert_eq!(summary.late_payments[0].days_late, 1);
        assert_eq!(summary.late_payments[1].days_late, 15);
    }

    #[test]
    fn pending_tenants_carry_their_balance() {
        let settled = tenant(
            "Settled",
            500.0,
            vec![payment(500.0, date(2025, 8, 1), PaymentMethod::Cash)],
        );
        let owing = tenant("Owing", 900.0, vec![]);

        let summary = dashboard_summary(&[settled, owing], date(2025, 8, 15));
        assert_eq!(summary.pending_tenants.len(), 1);
        assert_eq!(summary.pending_tenants[0].name, "Owing");
        assert_eq!(summary.pending_tenants[0].balance, 900.0);
    }

    #[test]
    fn method_totals_sum_per_method() {
        let t = tenant(
            "Joe",
            1000.0,
            vec![
                payment(100.0, date(2025, 8, 1), PaymentMethod::Cash),
                payment(150.0, date(2025, 8, 2), PaymentMethod::Cash),
                payment(200.0, date(2025, 8, 3), PaymentMethod::Check),
            ],
        );
        let summary = dashboard_summary(&[t], date(2025, 8, 15));
        assert_eq!(summary.payment_method_totals[&PaymentMethod::Cash], 250.0);
        assert_eq!(summary.payment_method_totals[&PaymentMethod::Check], 200.0);
        assert!(
            !summary
                .payment_method_totals
                .contains_key(&PaymentMethod::MoneyOrder)
        );
    }

    #[test]
    fn trend_covers_six_months_oldest_first_across_year_boundary() {
        let t = tenant(
            "Joe",
            1000.0,
            vec![
                payment(100.0, date(2024, 9, 10), PaymentMethod::Cash),
                payment(200.0, date(2025, 2, 1), PaymentMethod::Cash),
                // Before the window; must not appear.
                payment(999.0, date(2024, 8, 31), PaymentMethod::Cash),
            ],
        );
        let summary = dashboard_summary(&[t], date(2025, 2, 15));

        let months: Vec<&str> = summary.monthly_trend.iter().map(|p| p.month.as_str()).collect();
        assert_eq!(
            months,
            vec!["Sep 24", "Oct 24", "Nov 24", "Dec 24", "Jan 25", "Feb 25"]
        );
        assert_eq!(summary.monthly_trend[0].amount, 100.0);
        assert_eq!(summary.monthly_trend[5].amount, 200.0);
        let window_total: f64 = summary.monthly_trend.iter().map(|p| p.amount).sum();
        assert_eq!(window_total, 300.0);
    }

    #[test]
    fn months_back_wraps_years() {
        assert_eq!(months_back(2025, 2, 0), (2025, 2));
        assert_eq!(months_back(2025, 2, 1), (2025, 1));
        assert_eq!(months_back(2025, 2, 2), (2024, 12));
        assert_eq!(months_back(2025, 2, 13), (2024, 1));
    }
}
