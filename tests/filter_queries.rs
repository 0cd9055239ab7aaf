use cadastro::db::entities::prelude::{Address, RefreshToken, Role, User};
use cadastro::db::entities::registration_timestamp;
use cadastro::db::{AddressFilter, Predicate, RepositoryBase, UnitOfWork, UserFilter};
use cadastro::test_helpers::memory_unit_of_work;

async fn seed(uow: &UnitOfWork) -> (Role, Role) {
    uow.role().add(Role::new("Admin")).await.unwrap().unwrap();
    uow.role().add(Role::new("Basic")).await.unwrap().unwrap();
    let admin = uow
        .role()
        .get_first_or_default(&Predicate::eq("name", "Admin"))
        .await
        .unwrap()
        .unwrap();
    let basic = uow
        .role()
        .get_first_or_default(&Predicate::eq("name", "Basic"))
        .await
        .unwrap()
        .unwrap();

    uow.user()
        .add(User::new("João Silva", "joao@example.com", "x", admin.id))
        .await
        .unwrap()
        .unwrap();
    uow.user()
        .add(User::new("Maria Souza", "maria@example.com", "x", basic.id))
        .await
        .unwrap()
        .unwrap();
    let mut inactive = User::new("Pedro Costa", "pedro@example.com", "x", basic.id);
    inactive.active = false;
    uow.user().add(inactive).await.unwrap().unwrap();

    (admin, basic)
}

async fn user_id(uow: &UnitOfWork, email: &str) -> i64 {
    uow.user()
        .get_first_or_default(&Predicate::eq("email", email))
        .await
        .unwrap()
        .unwrap()
        .id
}

#[tokio::test]
async fn user_filter_lists_active_users_with_their_role() {
    let uow = memory_unit_of_work().await;
    let (admin, _) = seed(&uow).await;

    let users = uow.user().get_by_filter(&UserFilter::default()).await.unwrap();
    assert_eq!(users.len(), 2, "inactive users are filtered out");

    let joao = users.iter().find(|u| u.email == "joao@example.com").unwrap();
    let role = joao.role.as_ref().expect("role populated by the join");
    assert_eq!(role.id, admin.id);
    assert_eq!(role.name, "Admin");
    assert_eq!(joao.role_id, role.id);

    let total = uow
        .user()
        .get_total_by_filter(&UserFilter::default())
        .await
        .unwrap();
    assert_eq!(total, 2);
}

#[tokio::test]
async fn user_filter_clauses_narrow_in_order() {
    let uow = memory_unit_of_work().await;
    seed(&uow).await;

    let by_name = uow
        .user()
        .get_by_filter(&UserFilter {
            name: Some("Jo".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(by_name.len(), 1);
    assert_eq!(by_name[0].name, "João Silva");

    let by_email = uow
        .user()
        .get_by_filter(&UserFilter {
            email: Some("maria@example.com".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(by_email.len(), 1);
    assert_eq!(by_email[0].name, "Maria Souza");

    let by_search = uow
        .user()
        .get_by_filter(&UserFilter {
            search: Some("maria@example.com".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(by_search.len(), 1);

    // Empty strings contribute no clause.
    let unfiltered = uow
        .user()
        .get_by_filter(&UserFilter {
            name: Some(String::new()),
            email: Some(String::new()),
            search: Some(String::new()),
        })
        .await
        .unwrap();
    assert_eq!(unfiltered.len(), 2);
}

#[tokio::test]
async fn user_by_id_join_is_optional_not_an_error() {
    let uow = memory_unit_of_work().await;
    seed(&uow).await;
    let joao = user_id(&uow, "joao@example.com").await;

    let found = uow.user().get_user_by_id(joao).await.unwrap();
    assert!(found.unwrap().role.is_some());

    let missing = uow.user().get_user_by_id(9999).await.unwrap();
    assert!(missing.is_none());
}

#[tokio::test]
async fn address_filters_scope_by_active_or_by_owner() {
    let uow = memory_unit_of_work().await;
    seed(&uow).await;
    let joao = user_id(&uow, "joao@example.com").await;
    let maria = user_id(&uow, "maria@example.com").await;

    uow.address()
        .add(Address::new(joao, "01310-100", "Av. Paulista", "Bela Vista", "São Paulo", 1000, "SP"))
        .await
        .unwrap()
        .unwrap();
    let mut old_home = Address::new(joao, "20040-020", "Rua da Assembleia", "Centro", "Rio de Janeiro", 10, "RJ");
    old_home.active = false;
    uow.address().add(old_home).await.unwrap().unwrap();
    uow.address()
        .add(Address::new(maria, "30110-017", "Av. do Contorno", "Funcionários", "Belo Horizonte", 500, "MG"))
        .await
        .unwrap()
        .unwrap();

    let active_only = uow
        .address()
        .get_by_filter(&AddressFilter::default())
        .await
        .unwrap();
    assert_eq!(active_only.len(), 2);
    assert!(active_only.iter().all(|address| address.active));
    assert!(active_only.iter().all(|address| address.user.is_some()));

    let sp = uow
        .address()
        .get_by_filter(&AddressFilter {
            uf: Some("SP".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(sp.len(), 1);
    assert_eq!(sp[0].user.as_ref().unwrap().id, joao);

    let by_district = uow
        .address()
        .get_total_by_filter(&AddressFilter {
            district: Some("Bela".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(by_district, 1);

    // Owner-scoped listing ignores the active flag.
    let joao_addresses = uow
        .address()
        .get_user_addresses(joao, &AddressFilter::default())
        .await
        .unwrap();
    assert_eq!(joao_addresses.len(), 2);
    let joao_total = uow
        .address()
        .get_total_user_addresses(joao, &AddressFilter::default())
        .await
        .unwrap();
    assert_eq!(joao_total, 2);
}

#[tokio::test]
async fn refresh_token_active_lookup_skips_revoked_tokens() {
    let uow = memory_unit_of_work().await;
    seed(&uow).await;
    let joao = user_id(&uow, "joao@example.com").await;

    let expires = registration_timestamp() + chrono::Duration::days(7);
    uow.refresh_token()
        .add(RefreshToken::new(joao, "tok-live", expires, "10.0.0.1"))
        .await
        .unwrap()
        .unwrap();

    let mut revoked = RefreshToken::new(joao, "tok-revoked", expires, "10.0.0.1");
    revoked.revoked = Some(registration_timestamp());
    revoked.revoked_by_ip = Some("10.0.0.2".to_string());
    revoked.replaced_by_token = Some("tok-live".to_string());
    uow.refresh_token().add(revoked).await.unwrap().unwrap();

    let live = uow
        .refresh_token()
        .find_active_by_token("tok-live")
        .await
        .unwrap()
        .expect("live token is found");
    assert!(live.is_active(registration_timestamp()));
    assert_eq!(live.created_by_ip, "10.0.0.1");

    assert!(
        uow.refresh_token()
            .find_active_by_token("tok-revoked")
            .await
            .unwrap()
            .is_none()
    );
    let by_any = uow
        .refresh_token()
        .find_by_token("tok-revoked")
        .await
        .unwrap()
        .expect("unfiltered lookup still sees it");
    assert!(!by_any.is_active(registration_timestamp()));
    assert_eq!(by_any.replaced_by_token.as_deref(), Some("tok-live"));
}

#[tokio::test]
async fn basic_profile_is_found_by_name() {
    let uow = memory_unit_of_work().await;
    seed(&uow).await;

    let basic = uow.role().get_basic_profile("Basic").await.unwrap();
    assert_eq!(basic.map(|role| role.name), Some("Basic".to_string()));

    let missing = uow.role().get_basic_profile("Manager").await.unwrap();
    assert!(missing.is_none());
}
