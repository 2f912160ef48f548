use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Business {
    pub business_name: String,
    pub line_of_business: String,
    pub registered_address: String,
    pub started_date: String,
    pub tin: String,
    pub zip_code: String,
}

#[derive(Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Client {
    pub id: Option<i32>,
    pub firstname: String,
    pub lastname: String,
    pub middlename: Option<String>,
    pub birthday: String,
    pub email: Option<String>,
    pub contact_number: Option<String>,
    #[serde(default)]
    pub business: Vec<Business>,
}

impl Client {
    /// Reconstructed "first middle last" name. Transactions reference clients
    /// by this string, not by id, so it doubles as the join key (see
    /// `export::match_client`).
    pub fn full_name(&self) -> String {
        let mut parts = vec![self.firstname.trim()];
        if let Some(middle) = &self.middlename {
            if !middle.trim().is_empty() {
                parts.push(middle.trim());
            }
        }
        parts.push(self.lastname.trim());
        parts
            .into_iter()
            .filter(|p| !p.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[derive(Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ServiceForm {
    pub name: String,
    pub file: String,
    pub price: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Service {
    pub id: i32,
    pub service: String,
    #[serde(default)]
    pub forms: Vec<ServiceForm>,
}

/// A priced line item snapshotted onto a transaction at creation time.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize, Default)]
pub struct Inquiry {
    pub name: String,
    pub price: String,
    pub service: String,
}

impl Inquiry {
    /// Prices travel as strings on the wire; unparsable values count as zero.
    pub fn price_value(&self) -> f64 {
        self.price.trim().parse::<f64>().unwrap_or(0.0)
    }
}

/// Payment-side status. Pending is the only non-terminal state.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize, Default)]
pub enum TransactionStatus {
    #[default]
    Pending,
    Completed,
    Cancelled,
}

/// Fulfilment-side progress, updated independently of `TransactionStatus`
/// through its own endpoint.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize, Default)]
pub enum TransactProgress {
    #[serde(rename = "In Progress")]
    #[default]
    InProgress,
    Completed,
    Failed,
}

impl TransactionStatus {
    pub const ALL: [TransactionStatus; 3] = [
        TransactionStatus::Pending,
        TransactionStatus::Completed,
        TransactionStatus::Cancelled,
    ];

    pub fn label(self) -> &'static str {
        match self {
            TransactionStatus::Pending => "Pending",
            TransactionStatus::Completed => "Completed",
            TransactionStatus::Cancelled => "Cancelled",
        }
    }

    pub fn badge_class(self) -> &'static str {
        match self {
            TransactionStatus::Pending => "bg-yellow-400 text-yellow-800",
            TransactionStatus::Completed => "bg-green-400 text-green-800",
            TransactionStatus::Cancelled => "bg-red-400 text-red-800",
        }
    }

    /// Compatibility table between the two status axes. The backend does not
    /// enforce this; the admin table shows a warning badge on pairs the table
    /// rejects.
    ///
    /// | status \ progress | In Progress | Completed | Failed |
    /// |-------------------|-------------|-----------|--------|
    /// | Pending           | yes         | yes       | yes    |
    /// | Completed         | no          | yes       | no     |
    /// | Cancelled         | yes         | no        | yes    |
    pub fn accepts(self, progress: TransactProgress) -> bool {
        match self {
            TransactionStatus::Pending => true,
            TransactionStatus::Completed => progress == TransactProgress::Completed,
            TransactionStatus::Cancelled => progress != TransactProgress::Completed,
        }
    }
}

impl TransactProgress {
    pub const ALL: [TransactProgress; 3] = [
        TransactProgress::InProgress,
        TransactProgress::Completed,
        TransactProgress::Failed,
    ];

    pub fn label(self) -> &'static str {
        match self {
            TransactProgress::InProgress => "In Progress",
            TransactProgress::Completed => "Completed",
            TransactProgress::Failed => "Failed",
        }
    }

    pub fn badge_class(self) -> &'static str {
        match self {
            TransactProgress::InProgress => "bg-blue-400 text-blue-800",
            TransactProgress::Completed => "bg-green-400 text-green-800",
            TransactProgress::Failed => "bg-red-400 text-red-800",
        }
    }
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize, Default)]
pub struct Transaction {
    pub id: i32,
    // Denormalized client full name and business identifiers, captured at
    // creation time. Renaming a client breaks this join.
    pub name: String,
    pub status: TransactionStatus,
    #[serde(default)]
    pub transact: TransactProgress,
    pub date: String,
    #[serde(default)]
    pub tin_id: String,
    #[serde(default)]
    pub business_name: String,
    #[serde(default)]
    pub inquiries: Vec<Inquiry>,
}

impl Transaction {
    pub fn status_pair_is_consistent(&self) -> bool {
        self.status.accepts(self.transact)
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Annual,
    Quarterly,
    Monthly,
    #[default]
    Manual,
}

impl Frequency {
    pub const ALL: [Frequency; 4] = [
        Frequency::Annual,
        Frequency::Quarterly,
        Frequency::Monthly,
        Frequency::Manual,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Frequency::Annual => "annual",
            Frequency::Quarterly => "quarterly",
            Frequency::Monthly => "monthly",
            Frequency::Manual => "manual",
        }
    }
}

/// A recurring filing obligation shown with a countdown in the dashboard.
#[derive(Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct TaxForm {
    pub id: i32,
    pub form_no: String,
    pub due_date: String,
    pub frequency: Frequency,
}

impl TaxForm {
    /// Days from `today` to the due date; None when the date does not parse.
    pub fn days_until_due(&self, today: NaiveDate) -> Option<i64> {
        let due = NaiveDate::parse_from_str(self.due_date.trim(), "%Y-%m-%d").ok()?;
        Some((due - today).num_days())
    }

    /// Due within the next `window` days (overdue forms count as due).
    pub fn due_within(&self, today: NaiveDate, window: i64) -> bool {
        matches!(self.days_until_due(today), Some(days) if days <= window)
    }
}

#[derive(Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Announcement {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub date: String,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ProofKind {
    #[default]
    Image,
    Video,
    Embed,
}

/// A media entry documenting completed work, shown on the public site.
#[derive(Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ProofOfTransaction {
    pub id: i32,
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: ProofKind,
    pub content: String,
}

#[derive(Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct DashboardStats {
    #[serde(default)]
    pub total_clients: u32,
    #[serde(default)]
    pub total_services: u32,
    #[serde(default)]
    pub total_tax_forms: u32,
    #[serde(default)]
    pub total_transactions: u32,
    #[serde(default)]
    pub status_counts: HashMap<String, u32>,
    #[serde(default)]
    pub transact_counts: HashMap<String, u32>,
}

impl DashboardStats {
    /// Local fallback when the stats endpoint fails: recompute what can be
    /// derived from the transaction list, leave the other totals at zero.
    pub fn recompute(transactions: &[Transaction]) -> Self {
        let mut stats = DashboardStats {
            total_transactions: transactions.len() as u32,
            ..Default::default()
        };
        for tx in transactions {
            *stats
                .status_counts
                .entry(tx.status.label().to_string())
                .or_insert(0) += 1;
            *stats
                .transact_counts
                .entry(tx.transact.label().to_string())
                .or_insert(0) += 1;
        }
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_name_skips_empty_middle_name() {
        let client = Client {
            firstname: "Maria".to_string(),
            middlename: Some(" ".to_string()),
            lastname: "Santos".to_string(),
            ..Default::default()
        };
        assert_eq!(client.full_name(), "Maria Santos");

        let with_middle = Client {
            firstname: "Maria".to_string(),
            middlename: Some("Luisa".to_string()),
            lastname: "Santos".to_string(),
            ..Default::default()
        };
        assert_eq!(with_middle.full_name(), "Maria Luisa Santos");
    }

    #[test]
    fn test_status_compatibility_table() {
        use TransactProgress::{Failed, InProgress};
        use TransactionStatus::{Cancelled, Completed, Pending};

        for progress in TransactProgress::ALL {
            assert!(Pending.accepts(progress));
        }
        assert!(Completed.accepts(TransactProgress::Completed));
        assert!(!Completed.accepts(InProgress));
        assert!(!Completed.accepts(Failed));
        assert!(!Cancelled.accepts(TransactProgress::Completed));
        assert!(Cancelled.accepts(Failed));
    }

    #[test]
    fn test_transact_progress_wire_names() {
        let json = serde_json::to_string(&TransactProgress::InProgress).unwrap();
        assert_eq!(json, "\"In Progress\"");
        let back: TransactProgress = serde_json::from_str("\"Failed\"").unwrap();
        assert_eq!(back, TransactProgress::Failed);
    }

    #[test]
    fn test_days_until_due() {
        let form = TaxForm {
            form_no: "1701".to_string(),
            due_date: "2025-04-15".to_string(),
            ..Default::default()
        };
        let today = NaiveDate::from_ymd_opt(2025, 4, 13).unwrap();
        assert_eq!(form.days_until_due(today), Some(2));
        assert!(form.due_within(today, 3));
        assert!(!form.due_within(NaiveDate::from_ymd_opt(2025, 4, 1).unwrap(), 3));

        let bad = TaxForm {
            due_date: "soon".to_string(),
            ..Default::default()
        };
        assert_eq!(bad.days_until_due(today), None);
        assert!(!bad.due_within(today, 3));
    }

    #[test]
    fn test_overdue_form_counts_as_due() {
        let form = TaxForm {
            due_date: "2025-04-10".to_string(),
            ..Default::default()
        };
        let today = NaiveDate::from_ymd_opt(2025, 4, 13).unwrap();
        assert_eq!(form.days_until_due(today), Some(-3));
        assert!(form.due_within(today, 3));
    }

    #[test]
    fn test_recomputed_stats_count_both_axes() {
        let transactions = vec![
            Transaction {
                status: TransactionStatus::Pending,
                transact: TransactProgress::InProgress,
                ..Default::default()
            },
            Transaction {
                status: TransactionStatus::Pending,
                transact: TransactProgress::Failed,
                ..Default::default()
            },
            Transaction {
                status: TransactionStatus::Completed,
                transact: TransactProgress::Completed,
                ..Default::default()
            },
        ];
        let stats = DashboardStats::recompute(&transactions);
        assert_eq!(stats.total_transactions, 3);
        assert_eq!(stats.status_counts.get("Pending"), Some(&2));
        assert_eq!(stats.transact_counts.get("In Progress"), Some(&1));
        assert_eq!(stats.total_clients, 0);
    }
}
