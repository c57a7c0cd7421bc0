use serde::{Deserialize, Serialize};

/// Decimal amounts arrive from the backend either as JSON strings
/// (DRF `DecimalField` default) or as plain numbers. Accept both.
pub mod decimal {
    use serde::de::{Deserializer, Error};
    use serde::Deserialize;
    use serde_json::Value;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<f64, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Value::deserialize(deserializer)? {
            Value::String(s) => s
                .trim()
                .parse::<f64>()
                .map_err(|_| Error::custom(format!("invalid decimal amount: {s:?}"))),
            Value::Number(n) => n
                .as_f64()
                .ok_or_else(|| Error::custom("decimal amount out of range")),
            other => Err(Error::custom(format!(
                "expected a decimal amount, got {other}"
            ))),
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TxKind {
    Income,
    Expense,
}

impl TxKind {
    pub fn as_str(self) -> &'static str {
        match self {
            TxKind::Income => "income",
            TxKind::Expense => "expense",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TxKind::Income => "Income",
            TxKind::Expense => "Expense",
        }
    }

    pub fn sign(self) -> &'static str {
        match self {
            TxKind::Income => "+",
            TxKind::Expense => "-",
        }
    }
}

#[derive(Clone, PartialEq, Debug, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub category_type: TxKind,
    pub is_default: bool,
}

/// Union of income and expense records as served by `/transactions/`.
/// Dashboard "recent" entries omit the bookkeeping timestamps.
#[derive(Clone, PartialEq, Debug, Deserialize)]
pub struct Transaction {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: TxKind,
    #[serde(with = "decimal")]
    pub amount: f64,
    pub category: Option<String>,
    pub date: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// Create/update body for `/incomes/` and `/expenses/`. The category is a
/// name reference, not an id, and is omitted entirely when unset.
#[derive(Clone, PartialEq, Debug, Serialize)]
pub struct TransactionPayload {
    pub amount: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub date: String,
    pub description: String,
}

/// Filter state for the transaction list. Empty fields are not sent.
#[derive(Clone, PartialEq, Debug, Default)]
pub struct TransactionFilter {
    pub category: String,
    pub kind: String,
    pub start_date: String,
    pub end_date: String,
}

impl TransactionFilter {
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if !self.category.is_empty() {
            params.push(("category", self.category.clone()));
        }
        if !self.kind.is_empty() {
            params.push(("type", self.kind.clone()));
        }
        if !self.start_date.is_empty() {
            params.push(("start_date", self.start_date.clone()));
        }
        if !self.end_date.is_empty() {
            params.push(("end_date", self.end_date.clone()));
        }
        params
    }
}

#[derive(Clone, PartialEq, Debug, Deserialize)]
pub struct Period {
    pub start_date: String,
    pub end_date: String,
}

#[derive(Clone, PartialEq, Debug, Deserialize)]
pub struct Totals {
    #[serde(with = "decimal")]
    pub total_income: f64,
    #[serde(with = "decimal")]
    pub total_expense: f64,
    #[serde(with = "decimal")]
    pub balance: f64,
}

#[derive(Clone, PartialEq, Debug, Deserialize)]
pub struct CategoryTotal {
    pub category: String,
    #[serde(with = "decimal")]
    pub total: f64,
}

/// Backend-computed aggregate for the dashboard; never cached client-side.
#[derive(Clone, PartialEq, Debug, Deserialize)]
pub struct DashboardData {
    pub period: Period,
    pub summary: Totals,
    pub expense_by_category: Vec<CategoryTotal>,
    pub income_by_category: Vec<CategoryTotal>,
    pub recent_transactions: Vec<Transaction>,
}

#[derive(Clone, PartialEq, Debug, Deserialize)]
pub struct TokenPair {
    pub access: String,
    pub refresh: String,
}

#[derive(Clone, PartialEq, Debug, Deserialize)]
pub struct AccessToken {
    pub access: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transaction_accepts_string_amount() {
        let json = r#"{
            "id": 7,
            "type": "expense",
            "amount": "250.00",
            "category": "Food",
            "date": "2024-03-01",
            "description": "Groceries",
            "created_at": "2024-03-01T10:00:00Z",
            "updated_at": "2024-03-01T10:00:00Z"
        }"#;
        let tx: Transaction = serde_json::from_str(json).unwrap();
        assert_eq!(tx.kind, TxKind::Expense);
        assert_eq!(tx.amount, 250.0);
        assert_eq!(tx.category.as_deref(), Some("Food"));
    }

    #[test]
    fn transaction_accepts_numeric_amount_and_missing_timestamps() {
        let json = r#"{
            "id": 1,
            "type": "income",
            "amount": 1500.0,
            "category": null,
            "date": "2024-03-05",
            "description": ""
        }"#;
        let tx: Transaction = serde_json::from_str(json).unwrap();
        assert_eq!(tx.kind, TxKind::Income);
        assert_eq!(tx.amount, 1500.0);
        assert!(tx.category.is_none());
        assert!(tx.created_at.is_none());
    }

    #[test]
    fn payload_omits_unset_category() {
        let payload = TransactionPayload {
            amount: 250.0,
            category: None,
            date: "2024-03-01".into(),
            description: "".into(),
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert!(json.get("category").is_none());
        assert_eq!(json["amount"], 250.0);
    }

    #[test]
    fn payload_sends_category_by_name() {
        let payload = TransactionPayload {
            amount: 99.5,
            category: Some("Food".into()),
            date: "2024-03-01".into(),
            description: "Lunch".into(),
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["category"], "Food");
    }

    #[test]
    fn filter_skips_empty_fields() {
        let filter = TransactionFilter {
            category: "Food".into(),
            kind: "expense".into(),
            ..Default::default()
        };
        assert_eq!(
            filter.to_query(),
            vec![("category", "Food".to_string()), ("type", "expense".to_string())]
        );
        assert!(TransactionFilter::default().to_query().is_empty());
    }

    #[test]
    fn dashboard_summary_decodes_mixed_number_forms() {
        let json = r#"{
            "period": {"start_date": "2024-03-01", "end_date": "2024-03-31"},
            "summary": {"total_income": "1500.00", "total_expense": "600.50", "balance": 899.5},
            "expense_by_category": [{"category": "Food", "total": "600.50"}],
            "income_by_category": [],
            "recent_transactions": []
        }"#;
        let data: DashboardData = serde_json::from_str(json).unwrap();
        assert_eq!(data.summary.total_income, 1500.0);
        assert_eq!(data.summary.total_expense, 600.5);
        assert_eq!(data.summary.balance, 899.5);
        assert_eq!(data.expense_by_category[0].total, 600.5);
    }

    #[test]
    fn kind_round_trips_through_lowercase() {
        assert_eq!(serde_json::to_string(&TxKind::Income).unwrap(), "\"income\"");
        let kind: TxKind = serde_json::from_str("\"expense\"").unwrap();
        assert_eq!(kind, TxKind::Expense);
    }
}
