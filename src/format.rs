use crate::models::TxKind;

pub fn rupees(amount: f64) -> String {
    format!("Rs. {:.2}", amount)
}

/// Signed display used in transaction lists: incomes read "+ Rs. 250.00",
/// expenses "- Rs. 250.00".
pub fn signed_rupees(kind: TxKind, amount: f64) -> String {
    format!("{} {}", kind.sign(), rupees(amount))
}

pub fn balance_class(balance: f64) -> &'static str {
    if balance >= 0.0 {
        "positive"
    } else {
        "negative"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_amount() {
        assert_eq!(rupees(899.5), "Rs. 899.50");
        assert_eq!(rupees(0.0), "Rs. 0.00");
    }

    #[test]
    fn signed_amounts() {
        assert_eq!(signed_rupees(TxKind::Expense, 250.0), "- Rs. 250.00");
        assert_eq!(signed_rupees(TxKind::Income, 1500.0), "+ Rs. 1500.00");
    }

    #[test]
    fn balance_styling() {
        // balance = total_income - total_expense, computed by the backend
        assert_eq!(balance_class(1500.0 - 600.5), "positive");
        assert_eq!(balance_class(0.0), "positive");
        assert_eq!(balance_class(-0.01), "negative");
    }
}
