// ═══════════════════════════════════════════════════════════════════
// Model Tests — AssetKey, Transaction, Ledger, PriceBook, serde wire
// format
// ═══════════════════════════════════════════════════════════════════

use chrono::NaiveDate;

use invest_tracker_core::models::asset::{AssetKey, AssetType};
use invest_tracker_core::models::ledger::Ledger;
use invest_tracker_core::models::price::PriceBook;
use invest_tracker_core::models::transaction::{
    Transaction, TransactionDraft, TransactionType,
};

fn make_date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn buy_draft(symbol: &str) -> TransactionDraft {
    TransactionDraft {
        date: make_date(2025, 1, 15),
        asset_type: AssetType::Stock,
        symbol: symbol.to_string(),
        name: "Some Stock".to_string(),
        kind: TransactionType::Buy,
        price: 10.0,
        quantity: 100.0,
        fee: 5.0,
        amount: None,
        note: None,
    }
}

// ═══════════════════════════════════════════════════════════════════
// AssetKey
// ═══════════════════════════════════════════════════════════════════

mod asset_key {
    use super::*;

    #[test]
    fn symbol_is_uppercased() {
        let key = AssetKey::new(AssetType::Stock, "aapl");
        assert_eq!(key.symbol, "AAPL");
    }

    #[test]
    fn equal_when_type_and_symbol_match() {
        let a = AssetKey::new(AssetType::Fund, "510300");
        let b = AssetKey::new(AssetType::Fund, "510300");
        assert_eq!(a, b);
    }

    #[test]
    fn same_symbol_different_type_does_not_collide() {
        let stock = AssetKey::new(AssetType::Stock, "VTI");
        let fund = AssetKey::new(AssetType::Fund, "VTI");
        assert_ne!(stock, fund);

        let mut map = std::collections::HashMap::new();
        map.insert(stock, 1.0);
        map.insert(fund, 2.0);
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn display_format() {
        let key = AssetKey::new(AssetType::Bond, "019547");
        assert_eq!(key.to_string(), "bond:019547");
    }
}

// ═══════════════════════════════════════════════════════════════════
// Wire format
// ═══════════════════════════════════════════════════════════════════

mod wire_format {
    use super::*;

    #[test]
    fn asset_type_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&AssetType::Stock).unwrap(), "\"stock\"");
        assert_eq!(serde_json::to_string(&AssetType::Fund).unwrap(), "\"fund\"");
        assert_eq!(serde_json::to_string(&AssetType::Bond).unwrap(), "\"bond\"");
        assert_eq!(serde_json::to_string(&AssetType::Other).unwrap(), "\"other\"");
    }

    #[test]
    fn transaction_type_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&TransactionType::Buy).unwrap(), "\"buy\"");
        assert_eq!(serde_json::to_string(&TransactionType::Sell).unwrap(), "\"sell\"");
        assert_eq!(
            serde_json::to_string(&TransactionType::Dividend).unwrap(),
            "\"dividend\""
        );
    }

    #[test]
    fn transaction_json_round_trip() {
        let t = Transaction::new(buy_draft("AAPL"));
        let json = serde_json::to_string(&t).unwrap();
        let back: Transaction = serde_json::from_str(&json).unwrap();
        assert_eq!(back, t);
    }

    #[test]
    fn optional_fields_default_when_absent() {
        // A record without amount/note must still deserialize
        let json = r#"{
            "id": "b7f8b7c8-7a41-4a8e-9d3f-2e6c1f5a0d11",
            "date": "2025-01-15",
            "asset_type": "stock",
            "symbol": "AAPL",
            "name": "Apple Inc.",
            "type": "buy",
            "price": 10.0,
            "quantity": 100.0,
            "fee": 5.0,
            "created_at": "2025-01-15T10:00:00Z",
            "updated_at": "2025-01-15T10:00:00Z"
        }"#;
        let t: Transaction = serde_json::from_str(json).unwrap();
        assert_eq!(t.amount, None);
        assert_eq!(t.note, None);
    }
}

// ═══════════════════════════════════════════════════════════════════
// Transaction
// ═══════════════════════════════════════════════════════════════════

mod transaction {
    use super::*;

    #[test]
    fn new_mints_unique_ids() {
        let a = Transaction::new(buy_draft("AAPL"));
        let b = Transaction::new(buy_draft("AAPL"));
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn new_uppercases_symbol() {
        let t = Transaction::new(buy_draft("msft"));
        assert_eq!(t.symbol, "MSFT");
    }

    #[test]
    fn new_stamps_created_and_updated_equal() {
        let t = Transaction::new(buy_draft("AAPL"));
        assert_eq!(t.created_at, t.updated_at);
    }

    #[test]
    fn asset_key_combines_type_and_symbol() {
        let t = Transaction::new(buy_draft("AAPL"));
        assert_eq!(t.asset_key(), AssetKey::new(AssetType::Stock, "AAPL"));
    }

    #[test]
    fn cash_amount_prefers_explicit_amount() {
        let mut draft = buy_draft("AAPL");
        draft.kind = TransactionType::Dividend;
        draft.quantity = 0.0;
        draft.price = 12.0;
        draft.amount = Some(50.0);
        let t = Transaction::new(draft);
        assert_eq!(t.cash_amount(), 50.0);
    }

    #[test]
    fn cash_amount_falls_back_to_price() {
        let mut draft = buy_draft("AAPL");
        draft.kind = TransactionType::Dividend;
        draft.quantity = 0.0;
        draft.price = 12.0;
        draft.amount = None;
        let t = Transaction::new(draft);
        assert_eq!(t.cash_amount(), 12.0);
    }
}

// ═══════════════════════════════════════════════════════════════════
// Ledger & PriceBook
// ═══════════════════════════════════════════════════════════════════

mod containers {
    use super::*;

    #[test]
    fn ledger_default_is_empty() {
        let ledger = Ledger::default();
        assert!(ledger.transactions.is_empty());
        assert!(ledger.net_values.is_empty());
        assert_eq!(ledger.initial_cash, 0.0);
    }

    #[test]
    fn ledger_deserializes_with_missing_optional_sections() {
        let ledger: Ledger = serde_json::from_str(r#"{"transactions": []}"#).unwrap();
        assert!(ledger.net_values.is_empty());
        assert_eq!(ledger.initial_cash, 0.0);
    }

    #[test]
    fn price_book_set_and_get() {
        let mut book = PriceBook::new();
        book.set(AssetType::Stock, "aapl", 185.0);

        let key = AssetKey::new(AssetType::Stock, "AAPL");
        assert_eq!(book.get(&key), Some(185.0));
        assert_eq!(book.len(), 1);
    }

    #[test]
    fn price_book_keys_by_asset_type() {
        let mut book = PriceBook::new();
        book.set(AssetType::Stock, "VTI", 100.0);
        book.set(AssetType::Fund, "VTI", 200.0);

        assert_eq!(book.get(&AssetKey::new(AssetType::Stock, "VTI")), Some(100.0));
        assert_eq!(book.get(&AssetKey::new(AssetType::Fund, "VTI")), Some(200.0));
    }

    #[test]
    fn price_book_clear() {
        let mut book = PriceBook::new();
        book.set(AssetType::Stock, "AAPL", 185.0);
        book.clear();
        assert!(book.is_empty());
    }
}
