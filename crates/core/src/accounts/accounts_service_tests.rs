#[cfg(test)]
mod tests {
    use crate::accounts::{AccountService, AccountServiceTrait, AccountUpdate, NewAccount};
    use crate::config::JournalConfig;
    use crate::test_support::MockAccountRepository;
    use rust_decimal_macros::dec;
    use std::sync::Arc;

    fn service(repository: MockAccountRepository) -> AccountService {
        AccountService::new(Arc::new(repository), JournalConfig::default())
    }

    #[tokio::test]
    async fn test_create_and_edit_initial_balance() {
        let service = service(MockAccountRepository::new());
        service
            .create_account(NewAccount {
                user_id: "user-1".to_string(),
                name: "Futures".to_string(),
                currency: "USD".to_string(),
                initial_balance: None,
            })
            .await
            .unwrap();
        assert_eq!(service.get_starting_balance("user-1").unwrap(), dec!(10000));

        let updated = service
            .update_account(AccountUpdate {
                user_id: "user-1".to_string(),
                name: "Futures".to_string(),
                currency: "USD".to_string(),
                initial_balance: Some(dec!(25000)),
            })
            .await
            .unwrap();
        assert_eq!(updated.initial_balance, Some(dec!(25000)));
        assert_eq!(service.get_starting_balance("user-1").unwrap(), dec!(25000));
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_balance() {
        let service = service(MockAccountRepository::new());
        let result = service
            .create_account(NewAccount {
                user_id: "user-1".to_string(),
                name: "Futures".to_string(),
                currency: "USD".to_string(),
                initial_balance: Some(dec!(-1)),
            })
            .await;
        assert!(result.is_err());
        assert!(service.get_account("user-1").unwrap_err().is_not_found());
    }

    #[test]
    fn test_starting_balance_for_unknown_user_is_default() {
        let service = service(MockAccountRepository::new());
        assert_eq!(service.get_starting_balance("nobody").unwrap(), dec!(10000));
    }

    #[test]
    fn test_starting_balance_propagates_store_failure() {
        let repository = MockAccountRepository::new().with_account("user-1", Some(dec!(500)));
        repository.fail_reads();
        let service = service(repository);
        assert!(service.get_starting_balance("user-1").is_err());
    }

    #[tokio::test]
    async fn test_delete_account() {
        let service = service(MockAccountRepository::new().with_account("user-1", None));
        service.delete_account("user-1").await.unwrap();
        assert!(service.get_account("user-1").is_err());
    }

    #[tokio::test]
    async fn test_create_defaults_blank_currency() {
        let service = service(MockAccountRepository::new());
        let account = service
            .create_account(NewAccount {
                user_id: "user-1".to_string(),
                name: "Futures".to_string(),
                currency: "  ".to_string(),
                initial_balance: None,
            })
            .await
            .unwrap();
        assert_eq!(account.currency, "USD");
    }
}
