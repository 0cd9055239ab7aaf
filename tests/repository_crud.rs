use cadastro::db::entities::prelude::{Address, Role, User};
use cadastro::db::entities::registration_timestamp;
use cadastro::db::{DbLayerError, Predicate, RepositoryBase, UnitOfWork};
use cadastro::test_helpers::memory_unit_of_work;

async fn seed_role(uow: &UnitOfWork, name: &str) -> Role {
    uow.role()
        .add(Role::new(name))
        .await
        .expect("insert role")
        .expect("role row written");
    uow.role()
        .get_first_or_default(&Predicate::eq("name", name))
        .await
        .expect("re-fetch role")
        .expect("role present")
}

#[tokio::test]
async fn add_returns_the_entity_and_the_store_assigns_the_id() {
    let uow = memory_unit_of_work().await;

    let added = uow.role().add(Role::new("Admin")).await.unwrap();
    assert!(added.is_some());
    // The generated key is not written back; re-fetch to observe it.
    assert_eq!(added.unwrap().id, 0);

    let fetched = uow
        .role()
        .get_first_or_default(&Predicate::eq("name", "Admin"))
        .await
        .unwrap()
        .expect("inserted role is queryable");
    assert!(fetched.id > 0);
    assert_eq!(fetched.name, "Admin");
    assert!(fetched.active);
}

#[tokio::test]
async fn added_rows_round_trip_by_value() {
    let uow = memory_unit_of_work().await;
    let role = seed_role(&uow, "Basic").await;

    let user = User::new("João Silva", "joao@example.com", "hunter2!", role.id);
    let added = uow.user().add(user.clone()).await.unwrap().unwrap();

    let fetched = uow
        .user()
        .get_first_or_default(&Predicate::eq("email", "joao@example.com"))
        .await
        .unwrap()
        .expect("user present");

    assert_eq!(fetched.name, added.name);
    assert_eq!(fetched.email, added.email);
    assert_eq!(fetched.password, added.password);
    assert_eq!(fetched.role_id, role.id);
    assert_eq!(fetched.validated, added.validated);
    assert_eq!(fetched.change_password, added.change_password);
    assert_eq!(
        fetched.registration_date.timestamp(),
        added.registration_date.timestamp()
    );
    // Navigation fields stay untouched by the generic path.
    assert!(fetched.role.is_none());
}

#[tokio::test]
async fn get_by_id_errors_while_first_or_default_stays_optional() {
    let uow = memory_unit_of_work().await;

    let missing = uow.role().get_by_id(42).await;
    assert!(matches!(
        missing,
        Err(DbLayerError::NotFound {
            entity: "roles",
            id: 42
        })
    ));

    let default = uow
        .role()
        .get_first_or_default(&Predicate::eq("id", 42))
        .await
        .unwrap();
    assert!(default.is_none());
}

#[tokio::test]
async fn update_rewrites_the_row_and_reports_missing_keys_as_false() {
    let uow = memory_unit_of_work().await;
    let mut role = seed_role(&uow, "Support").await;

    role.name = "Support N2".to_string();
    role.active = false;
    assert!(uow.role().update(&role).await.unwrap());

    let reloaded = uow.role().get_by_id(role.id).await.unwrap();
    assert_eq!(reloaded.name, "Support N2");
    assert!(!reloaded.active);

    // Unknown key: zero rows affected is an ordinary outcome, not an error.
    let ghost = Address {
        id: 999,
        ..Address::new(1, "01001-000", "Praça da Sé", "Sé", "São Paulo", 100, "SP")
    };
    assert!(!uow.address().update(&ghost).await.unwrap());
}

#[tokio::test]
async fn delete_removes_the_row_physically() {
    let uow = memory_unit_of_work().await;
    let role = seed_role(&uow, "Temporary").await;

    assert!(uow.role().delete(role.id).await.unwrap());
    assert!(!uow.role().delete(role.id).await.unwrap());

    let gone = uow.role().get_by_id(role.id).await;
    assert!(matches!(gone, Err(DbLayerError::NotFound { .. })));
}

#[tokio::test]
async fn add_range_requires_every_row_to_land() {
    let uow = memory_unit_of_work().await;

    let batch = vec![Role::new("Admin"), Role::new("Basic"), Role::new("Audit")];
    let added = uow.role().add_range(batch).await.unwrap();
    assert_eq!(added.map(|roles| roles.len()), Some(3));

    let total = uow.role().get_total(&Predicate::all(vec![])).await.unwrap();
    assert_eq!(total, 3);

    let matching = uow
        .role()
        .get(&Predicate::any(vec![
            Predicate::eq("name", "Admin"),
            Predicate::eq("name", "Audit"),
        ]))
        .await
        .unwrap();
    assert_eq!(matching.len(), 2);
}

#[tokio::test]
async fn get_all_scans_without_filtering_on_active() {
    let uow = memory_unit_of_work().await;
    let mut kept = seed_role(&uow, "Kept").await;

    kept.active = false;
    uow.role().update(&kept).await.unwrap();

    // Soft-deleted rows still come back from the generic scan.
    let all = uow.role().get_all().await.unwrap();
    assert_eq!(all.len(), 1);
    assert!(!all[0].active);
}

#[tokio::test]
async fn validation_code_expiry_window_is_queryable() {
    let uow = memory_unit_of_work().await;
    let role = seed_role(&uow, "Basic").await;

    let user = User::new("Maria", "maria@example.com", "s3nh4", role.id);
    uow.user().add(user).await.unwrap().expect("user written");
    let user = uow
        .user()
        .get_first_or_default(&Predicate::eq("email", "maria@example.com"))
        .await
        .unwrap()
        .unwrap();

    let expires = registration_timestamp() + chrono::Duration::minutes(10);
    uow.validation_code()
        .add(cadastro::db::entities::validation_code::ValidationCode::new(
            user.id, "123456", expires,
        ))
        .await
        .unwrap()
        .expect("code written");

    let code = uow
        .validation_code()
        .find_by_user(user.id)
        .await
        .unwrap()
        .expect("code present");
    assert_eq!(code.code, "123456");
    assert_eq!(code.expires.timestamp(), expires.timestamp());
}
