//! Store-level behaviour of the generic client against in-memory SQLite

mod common;

use async_trait::async_trait;
use common::*;
use gems_orm::options::{
    belong_to, exist_relation, exist_relation_with_key_value, order_asc, order_desc, page_size, preloads,
    relation_fields, search, where_cond, where_equal,
};
use gems_orm::{
    AnyObject, ClusterGetter, Context, DatabaseTransaction, Hook, HookPhase, ModelError, ModelResult, Object,
    QueryOperator, TypedHook, BATCH_SIZE,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

async fn seed_tenant(client: &gems_orm::Client, name: &str) -> Tenant {
    let mut t = tenant(name);
    client.create(&Context::background(), &mut t, &[]).await.unwrap();
    t
}

#[tokio::test]
async fn test_create_assigns_key_and_get_reads_back() {
    let client = client().await;
    let ctx = Context::background();

    let t = seed_tenant(&client, "alpha").await;
    assert!(t.id > 0);

    let mut loaded = Tenant { id: t.id, ..Default::default() };
    client.get(&ctx, &mut loaded, &[]).await.unwrap();
    assert_eq!(loaded.tenant_name, "alpha");
    assert_eq!(loaded.remark, "alpha remark");
    assert!(loaded.is_active);

    let mut by_name = Tenant::default();
    client
        .get(&ctx, &mut by_name, &[where_equal("tenant_name", "alpha")])
        .await
        .unwrap();
    assert_eq!(by_name.id, t.id);
}

#[tokio::test]
async fn test_get_missing_row_is_not_found() {
    let client = client().await;
    let mut missing = Tenant { id: 42, ..Default::default() };
    let err = client
        .get(&Context::background(), &mut missing, &[])
        .await
        .unwrap_err();
    assert!(err.is_not_found());
    assert!(matches!(err, ModelError::NotFound(table) if table == "tenants"));
}

#[tokio::test]
async fn test_exist_matches_non_zero_columns() {
    let client = client().await;
    let ctx = Context::background();
    seed_tenant(&client, "alpha").await;

    assert!(client.exist(&ctx, &tenant("alpha"), &[]).await);
    assert!(!client.exist(&ctx, &tenant("beta"), &[]).await);

    let lookup = Tenant { tenant_name: "alpha".into(), ..Default::default() };
    assert!(client.try_exist(&ctx, &lookup, &[]).await.unwrap());
    assert!(
        !client
            .try_exist(&ctx, &lookup, &[where_cond("id", QueryOperator::GreaterThan, 100i64)])
            .await
            .unwrap()
    );
}

#[tokio::test]
async fn test_relation_lookup_is_symmetric() {
    let client = client().await;
    let forward = client.relation("tenant", "user").unwrap();
    let backward = client.relation("user", "tenant").unwrap();
    assert_eq!(forward.key(), backward.key());
    assert_eq!(forward.via.map(|v| v.kind), Some("tenant_user_rel"));
    assert!(client.relation("user", "project").is_none());
}

#[tokio::test]
async fn test_paged_list_counts_with_same_filter() {
    let client = client().await;
    let ctx = Context::background();
    let alpha = seed_tenant(&client, "alpha").await;
    let beta = seed_tenant(&client, "beta").await;

    for i in 0..25 {
        let mut p = project(&format!("alpha-{:02}", i), alpha.id);
        client.create(&ctx, &mut p, &[]).await.unwrap();
    }
    for i in 0..3 {
        let mut p = project(&format!("beta-{:02}", i), beta.id);
        client.create(&ctx, &mut p, &[]).await.unwrap();
    }

    let mut list = ProjectList::default();
    client
        .list(&ctx, &mut list, &[belong_to(&alpha), page_size(2, 10), order_asc("id")])
        .await
        .unwrap();
    assert_eq!(list.items.len(), 10);
    assert_eq!(list.base.total, 25);
    assert_eq!((list.base.page, list.base.size), (2, 10));
    assert_eq!(list.items[0].project_name, "alpha-10");

    let mut last = ProjectList::default();
    client
        .list(&ctx, &mut last, &[belong_to(&alpha), page_size(3, 10), order_asc("id")])
        .await
        .unwrap();
    assert_eq!(last.items.len(), 5);
    assert_eq!(last.base.total, 25);

    // without paging everything is fetched and the total is untouched
    let mut all = ProjectList::default();
    client.list(&ctx, &mut all, &[order_desc("id")]).await.unwrap();
    assert_eq!(all.items.len(), 28);
    assert_eq!(all.base.total, 0);
    assert_eq!(all.items[0].project_name, "beta-02");
}

#[tokio::test]
async fn test_search_and_conditions() {
    let client = client().await;
    let ctx = Context::background();
    let alpha = seed_tenant(&client, "alpha").await;
    for name in ["frontend", "backend", "batch-jobs"] {
        let mut p = project(name, alpha.id);
        client.create(&ctx, &mut p, &[]).await.unwrap();
    }

    let mut found = ProjectList::default();
    client.list(&ctx, &mut found, &[search("end"), order_asc("project_name")]).await.unwrap();
    let names: Vec<_> = found.items.iter().map(|p| p.project_name.as_str()).collect();
    assert_eq!(names, vec!["backend", "frontend"]);

    let mut in_list = ProjectList::default();
    client
        .list(
            &ctx,
            &mut in_list,
            &[where_cond(
                "project_name",
                QueryOperator::In,
                gems_orm::DatabaseValue::array(["frontend", "batch-jobs"]),
            )],
        )
        .await
        .unwrap();
    assert_eq!(in_list.items.len(), 2);

    assert_eq!(client.count(&ctx, &PROJECT_META, &[]).await.unwrap(), 3);
    assert_eq!(
        client
            .count(&ctx, &PROJECT_META, &[where_equal("project_name", "backend")])
            .await
            .unwrap(),
        1
    );
    // count filters by conditions only; search text is not applied
    assert_eq!(client.count(&ctx, &PROJECT_META, &[search("end")]).await.unwrap(), 3);
}

#[tokio::test]
async fn test_unknown_preloads_are_ignored() {
    let client = client().await;
    let ctx = Context::background();
    let alpha = seed_tenant(&client, "alpha").await;
    let mut p = project("frontend", alpha.id);
    client.create(&ctx, &mut p, &[]).await.unwrap();

    let mut plain = Project { id: p.id, ..Default::default() };
    client.get(&ctx, &mut plain, &[]).await.unwrap();
    assert!(plain.tenant.is_none());

    let mut loaded = Project { id: p.id, ..Default::default() };
    client
        .get(&ctx, &mut loaded, &[preloads(["tenant", "environments", "no_such_field"])])
        .await
        .unwrap();
    let owner = loaded.tenant.expect("tenant preloaded");
    assert_eq!(owner.id, alpha.id);
    assert_eq!(owner.tenant_name, "alpha");
}

#[tokio::test]
async fn test_has_many_preload_groups_children() {
    let client = client().await;
    let ctx = Context::background();
    let alpha = seed_tenant(&client, "alpha").await;
    let beta = seed_tenant(&client, "beta").await;
    seed_tenant(&client, "gamma").await;
    for (name, owner) in [("a1", alpha.id), ("a2", alpha.id), ("b1", beta.id)] {
        let mut p = project(name, owner);
        client.create(&ctx, &mut p, &[]).await.unwrap();
    }

    let mut tenants = TenantList::default();
    client
        .list(&ctx, &mut tenants, &[preloads(["projects"]), order_asc("tenant_name")])
        .await
        .unwrap();
    let counts: Vec<_> = tenants.items.iter().map(|t| t.projects.len()).collect();
    assert_eq!(counts, vec![2, 1, 0]);
    assert_eq!(tenants.items[0].projects[1].project_name, "a2");
}

#[tokio::test]
async fn test_many_to_many_sub_resources() {
    let client = client().await;
    let ctx = Context::background();
    let alpha = seed_tenant(&client, "alpha").await;
    let beta = seed_tenant(&client, "beta").await;

    let mut users = Vec::new();
    for name in ["bob", "eve", "mallory"] {
        let mut u = user(name);
        client.create(&ctx, &mut u, &[]).await.unwrap();
        users.push(u);
    }
    for (t, u, role) in [
        (&alpha, &users[0], "admin"),
        (&alpha, &users[1], "ordinary"),
        (&beta, &users[2], "admin"),
    ] {
        let mut rel = TenantUserRel {
            tenant_id: t.id,
            user_id: u.id,
            role: role.to_string(),
            ..Default::default()
        };
        client.create(&ctx, &mut rel, &[]).await.unwrap();
    }

    let mut members = UserList::default();
    client
        .list_sub_resource(&ctx, &alpha, &mut members, &[relation_fields(["role"]), order_asc("username")])
        .await
        .unwrap();
    let got: Vec<_> = members
        .items
        .iter()
        .map(|u| (u.username.as_str(), u.role.as_str()))
        .collect();
    assert_eq!(got, vec![("bob", "admin"), ("eve", "ordinary")]);

    assert_eq!(
        client.count_sub_resource(&ctx, &alpha, &USER_META, &[]).await.unwrap(),
        2
    );
    assert_eq!(
        client
            .count_sub_resource(&ctx, &beta, &USER_META, &[search("mall")])
            .await
            .unwrap(),
        1
    );

    let mut paged = UserList::default();
    client
        .list_sub_resource(&ctx, &alpha, &mut paged, &[page_size(1, 1), order_asc("username")])
        .await
        .unwrap();
    assert_eq!(paged.items.len(), 1);
    assert_eq!(paged.base.total, 2);

    let mut admins = UserList::default();
    client
        .list(&ctx, &mut admins, &[exist_relation_with_key_value(&alpha, "role", "admin")])
        .await
        .unwrap();
    assert_eq!(admins.items.len(), 1);
    assert_eq!(admins.items[0].username, "bob");

    let mut of_beta = UserList::default();
    client.list(&ctx, &mut of_beta, &[exist_relation(&beta)]).await.unwrap();
    assert_eq!(of_beta.items.len(), 1);
    assert_eq!(of_beta.items[0].username, "mallory");
}

async fn seed_memberships(client: &gems_orm::Client, memberships: &[(i64, i64, &str)]) {
    for (tenant_id, user_id, role) in memberships {
        let mut rel = TenantUserRel {
            tenant_id: *tenant_id,
            user_id: *user_id,
            role: role.to_string(),
            ..Default::default()
        };
        client.create(&Context::background(), &mut rel, &[]).await.unwrap();
    }
}

#[tokio::test]
async fn test_many_to_many_preload_goes_through_the_junction() {
    let client = client().await;
    let ctx = Context::background();
    let alpha = seed_tenant(&client, "alpha").await;
    let beta = seed_tenant(&client, "beta").await;
    seed_tenant(&client, "gamma").await;

    let mut ids = Vec::new();
    for name in ["bob", "eve", "mallory"] {
        let mut u = user(name);
        client.create(&ctx, &mut u, &[]).await.unwrap();
        ids.push(u.id);
    }
    seed_memberships(
        &client,
        &[(alpha.id, ids[0], "admin"), (alpha.id, ids[1], "ordinary"), (beta.id, ids[1], "admin")],
    )
    .await;

    let mut tenants = TenantList::default();
    client
        .list(&ctx, &mut tenants, &[preloads(["users"]), order_asc("tenant_name")])
        .await
        .unwrap();
    let members: Vec<Vec<&str>> = tenants
        .items
        .iter()
        .map(|t| t.users.iter().map(|u| u.username.as_str()).collect())
        .collect();
    assert_eq!(members, vec![vec!["bob", "eve"], vec!["eve"], vec![]]);
    assert_eq!(tenants.items[1].users[0].id, ids[1]);

    let mut loaded = Tenant { id: beta.id, ..Default::default() };
    client.get(&ctx, &mut loaded, &[preloads(["users"])]).await.unwrap();
    assert_eq!(loaded.users.len(), 1);
    assert_eq!(loaded.users[0].email, "eve@example.com");
}

#[tokio::test]
async fn test_relation_fields_may_not_shadow_child_columns() {
    let client = client().await;
    let ctx = Context::background();
    let alpha = seed_tenant(&client, "alpha").await;
    let beta = seed_tenant(&client, "beta").await;

    // alpha's junction row gets id 3 while bob keeps id 1
    let mut ids = Vec::new();
    for name in ["bob", "eve"] {
        let mut u = user(name);
        client.create(&ctx, &mut u, &[]).await.unwrap();
        ids.push(u.id);
    }
    seed_memberships(
        &client,
        &[(beta.id, ids[0], "ordinary"), (beta.id, ids[1], "ordinary"), (alpha.id, ids[0], "admin")],
    )
    .await;

    let mut shadowed = UserList::default();
    let err = client
        .list_sub_resource(&ctx, &alpha, &mut shadowed, &[relation_fields(["id", "role"])])
        .await
        .unwrap_err();
    assert!(matches!(err, ModelError::Validation(_)));

    let mut members = UserList::default();
    client
        .list_sub_resource(&ctx, &alpha, &mut members, &[relation_fields(["role"])])
        .await
        .unwrap();
    assert_eq!(members.items.len(), 1);
    assert_eq!(members.items[0].id, ids[0]);
    assert_eq!(members.items[0].role, "admin");
}

#[tokio::test]
async fn test_ownership_sub_resources() {
    let client = client().await;
    let ctx = Context::background();
    let alpha = seed_tenant(&client, "alpha").await;
    let beta = seed_tenant(&client, "beta").await;
    for (name, owner) in [("a1", alpha.id), ("b1", beta.id), ("b2", beta.id)] {
        let mut p = project(name, owner);
        client.create(&ctx, &mut p, &[]).await.unwrap();
    }

    let mut projects = ProjectList::default();
    client
        .list_sub_resource(&ctx, &beta, &mut projects, &[order_asc("project_name")])
        .await
        .unwrap();
    let names: Vec<_> = projects.items.iter().map(|p| p.project_name.as_str()).collect();
    assert_eq!(names, vec!["b1", "b2"]);
}

#[tokio::test]
async fn test_unregistered_relation_is_an_error() {
    let client = client().await;
    let ctx = Context::background();
    let mut u = user("bob");
    client.create(&ctx, &mut u, &[]).await.unwrap();

    let mut projects = ProjectList::default();
    let err = client
        .list_sub_resource(&ctx, &u, &mut projects, &[])
        .await
        .unwrap_err();
    match err {
        ModelError::RelationNotRegistered(a, b) => {
            assert_eq!((a.as_str(), b.as_str()), ("user", "project"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_junction_rows_delete_and_exist() {
    let client = client().await;
    let ctx = Context::background();
    let alpha = seed_tenant(&client, "alpha").await;
    let mut bob = user("bob");
    client.create(&ctx, &mut bob, &[]).await.unwrap();

    let mut rel = TenantUserRel {
        tenant_id: alpha.id,
        user_id: bob.id,
        role: "admin".into(),
        ..Default::default()
    };
    client.create(&ctx, &mut rel, &[]).await.unwrap();
    let membership = TenantUserRel {
        tenant_id: alpha.id,
        user_id: bob.id,
        ..Default::default()
    };
    assert!(client.exist_m2m_relation(&ctx, &membership).await);

    let mut loaded = TenantUserRel { id: rel.id, ..Default::default() };
    client
        .get(&ctx, &mut loaded, &[preloads(["tenant", "user"])])
        .await
        .unwrap();
    assert_eq!(loaded.tenant.as_ref().map(|t| t.tenant_name.as_str()), Some("alpha"));
    assert_eq!(loaded.user.as_ref().map(|u| u.username.as_str()), Some("bob"));

    assert_eq!(client.del_m2m_relation(&ctx, &membership).await.unwrap(), 1);
    assert!(!client.try_exist_m2m_relation(&ctx, &membership).await.unwrap());
}

#[tokio::test]
async fn test_unique_violation_maps_to_constraint_violation() {
    let client = client().await;
    let ctx = Context::background();
    seed_tenant(&client, "alpha").await;

    let mut dup = tenant("alpha");
    let err = client.create(&ctx, &mut dup, &[]).await.unwrap_err();
    assert!(err.is_constraint_violation(), "got {err}");
    assert_eq!(dup.id, 0);
}

#[tokio::test]
async fn test_update_is_partial_and_needs_a_filter() {
    let client = client().await;
    let ctx = Context::background();
    let alpha = seed_tenant(&client, "alpha").await;

    let patch = Tenant {
        id: alpha.id,
        remark: "patched".into(),
        ..Default::default()
    };
    client.update(&ctx, &patch, &[]).await.unwrap();

    let mut loaded = Tenant { id: alpha.id, ..Default::default() };
    client.get(&ctx, &mut loaded, &[]).await.unwrap();
    assert_eq!(loaded.remark, "patched");
    assert_eq!(loaded.tenant_name, "alpha");
    assert!(loaded.is_active);

    let unscoped = Tenant { remark: "everyone".into(), ..Default::default() };
    let err = client.update(&ctx, &unscoped, &[]).await.unwrap_err();
    assert!(matches!(err, ModelError::Validation(_)));

    client
        .update(&ctx, &unscoped, &[where_equal("tenant_name", "alpha")])
        .await
        .unwrap();
    client.get(&ctx, &mut loaded, &[]).await.unwrap();
    assert_eq!(loaded.remark, "everyone");
}

/// Records the key and remark of every tenant an update hook sees
struct SeenTenants(Arc<Mutex<Vec<(i64, String)>>>);

#[async_trait]
impl TypedHook<Tenant> for SeenTenants {
    async fn call(&self, _tx: &mut dyn DatabaseTransaction, obj: &Tenant) -> ModelResult<()> {
        self.0.lock().unwrap().push((obj.id, obj.remark.clone()));
        Ok(())
    }
}

#[tokio::test]
async fn test_condition_scoped_update_hands_hooks_the_matched_keys() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let client = builder(pool().await)
        .typed_hook::<Tenant, _>(HookPhase::AfterUpdate, SeenTenants(seen.clone()))
        .build();
    let ctx = Context::background();
    let alpha = seed_tenant(&client, "alpha").await;
    seed_tenant(&client, "beta").await;
    let gamma = seed_tenant(&client, "gamma").await;

    let patch = Tenant { remark: "archived".into(), ..Default::default() };
    let scope = where_cond(
        "tenant_name",
        QueryOperator::In,
        gems_orm::DatabaseValue::array(["alpha", "gamma"]),
    );
    client.update(&ctx, &patch, &[scope]).await.unwrap();
    assert_eq!(
        *seen.lock().unwrap(),
        vec![(alpha.id, "archived".to_string()), (gamma.id, "archived".to_string())]
    );

    // no matching row: nothing is written and no hook runs
    seen.lock().unwrap().clear();
    client
        .update(&ctx, &patch, &[where_equal("tenant_name", "nobody")])
        .await
        .unwrap();
    assert!(seen.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_create_in_batches_spans_several_statements() {
    let client = client().await;
    let ctx = Context::background();

    let mut list = UserList {
        items: (0..BATCH_SIZE + 200).map(|i| user(&format!("user-{:04}", i))).collect(),
        ..Default::default()
    };
    client.create_in_batches(&ctx, &mut list, &[]).await.unwrap();

    assert!(list.items.iter().all(|u| u.id > 0));
    assert_eq!(
        client.count(&ctx, &USER_META, &[]).await.unwrap(),
        (BATCH_SIZE + 200) as i64
    );

    let mut loaded_user = User {
        id: list.items[BATCH_SIZE + 199].id,
        ..Default::default()
    };
    client.get(&ctx, &mut loaded_user, &[]).await.unwrap();
    assert_eq!(loaded_user.username, "user-1199");
}

#[tokio::test]
async fn test_batch_with_mixed_keys_is_rejected_atomically() {
    let client = client().await;
    let ctx = Context::background();

    let mut keyed = user("keyed");
    keyed.id = 500;
    let mut list = UserList {
        items: vec![user("fresh"), keyed],
        ..Default::default()
    };
    let err = client.create_in_batches(&ctx, &mut list, &[]).await.unwrap_err();
    assert!(matches!(err, ModelError::Validation(_)));
    assert_eq!(client.count(&ctx, &USER_META, &[]).await.unwrap(), 0);
}

struct Failing;

#[async_trait]
impl Hook for Failing {
    async fn call(&self, _tx: &mut dyn DatabaseTransaction, _obj: &dyn AnyObject) -> ModelResult<()> {
        Err(ModelError::Validation("resource sync refused".into()))
    }
}

async fn assert_failing_delete_hook_keeps_row(phase: HookPhase, expected: &str) {
    let client = builder(pool().await).hook("tenant", phase, Arc::new(Failing)).build();
    let ctx = Context::background();
    let alpha = seed_tenant(&client, "alpha").await;

    let err = client.delete(&ctx, &alpha, &[]).await.unwrap_err();
    match &err {
        ModelError::Hook { kind, phase, message } => {
            assert_eq!(kind, "tenant");
            assert_eq!(phase, expected);
            assert!(message.contains("resource sync refused"));
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(client.exist(&ctx, &tenant("alpha"), &[]).await);
}

#[tokio::test]
async fn test_failing_before_delete_hook_keeps_the_row() {
    assert_failing_delete_hook_keeps_row(HookPhase::BeforeDelete, "BeforeDelete").await;
}

#[tokio::test]
async fn test_failing_after_delete_hook_rolls_back() {
    assert_failing_delete_hook_keeps_row(HookPhase::AfterDelete, "AfterDelete").await;
}

/// Removes the user's memberships in the deleting transaction
struct DropMemberships;

#[async_trait]
impl TypedHook<User> for DropMemberships {
    async fn call(&self, tx: &mut dyn DatabaseTransaction, obj: &User) -> ModelResult<()> {
        tx.execute(
            "DELETE FROM tenant_user_rels WHERE user_id = ?",
            &[obj.pk_value()],
        )
        .await?;
        Ok(())
    }
}

struct Recorder {
    name: &'static str,
    log: Arc<Mutex<Vec<String>>>,
}

#[async_trait]
impl Hook for Recorder {
    async fn call(&self, _tx: &mut dyn DatabaseTransaction, obj: &dyn AnyObject) -> ModelResult<()> {
        let user = obj.downcast_ref::<User>().expect("user hook");
        self.log
            .lock()
            .unwrap()
            .push(format!("{}:{}", self.name, user.username));
        Ok(())
    }
}

#[tokio::test]
async fn test_delete_hooks_share_the_transaction() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let client = builder(pool().await)
        .hook(
            "user",
            HookPhase::BeforeDelete,
            Arc::new(Recorder { name: "first", log: log.clone() }),
        )
        .typed_hook::<User, _>(HookPhase::BeforeDelete, DropMemberships)
        .hook(
            "user",
            HookPhase::AfterDelete,
            Arc::new(Recorder { name: "after", log: log.clone() }),
        )
        .build();
    let ctx = Context::background();

    let alpha = seed_tenant(&client, "alpha").await;
    let mut bob = user("bob");
    client.create(&ctx, &mut bob, &[]).await.unwrap();
    let mut rel = TenantUserRel {
        tenant_id: alpha.id,
        user_id: bob.id,
        role: "admin".into(),
        ..Default::default()
    };
    client.create(&ctx, &mut rel, &[]).await.unwrap();

    client.delete(&ctx, &bob, &[]).await.unwrap();

    assert_eq!(*log.lock().unwrap(), vec!["first:bob", "after:bob"]);
    assert_eq!(client.count(&ctx, &TENANT_USER_REL_META, &[]).await.unwrap(), 0);
    assert_eq!(client.count(&ctx, &USER_META, &[]).await.unwrap(), 0);
}

struct CountingCreate(Arc<AtomicUsize>);

#[async_trait]
impl TypedHook<Tenant> for CountingCreate {
    async fn call(&self, tx: &mut dyn DatabaseTransaction, obj: &Tenant) -> ModelResult<()> {
        self.0.fetch_add(1, Ordering::SeqCst);
        // the row is visible inside the transaction once inserted
        let rows = tx
            .fetch_all("SELECT id FROM tenants WHERE id = ?", &[obj.pk_value()])
            .await?;
        if rows.len() != 1 {
            return Err(ModelError::Validation("row not visible to after hook".into()));
        }
        Ok(())
    }
}

#[tokio::test]
async fn test_create_hooks_are_transactional() {
    let calls = Arc::new(AtomicUsize::new(0));
    let client = builder(pool().await)
        .typed_hook::<Tenant, _>(HookPhase::AfterCreate, CountingCreate(calls.clone()))
        .hook("user", HookPhase::BeforeCreate, Arc::new(Failing))
        .build();
    let ctx = Context::background();

    let alpha = seed_tenant(&client, "alpha").await;
    assert!(alpha.id > 0);
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    let mut bob = user("bob");
    let err = client.create(&ctx, &mut bob, &[]).await.unwrap_err();
    assert!(matches!(err, ModelError::Hook { .. }));
    assert_eq!(client.count(&ctx, &USER_META, &[]).await.unwrap(), 0);
}

#[tokio::test]
async fn test_cancelled_and_expired_contexts() {
    let client = client().await;

    let cancelled = Context::background();
    cancelled.cancel();
    let mut t = tenant("alpha");
    let err = client.create(&cancelled, &mut t, &[]).await.unwrap_err();
    assert!(matches!(err, ModelError::Cancelled));

    // cancelling the parent reaches children
    let parent = Context::background();
    let child = parent.child();
    parent.cancel();
    assert!(child.is_cancelled());

    let expired = Context::background().with_timeout(Duration::ZERO);
    let mut list = TenantList::default();
    let err = client.list(&expired, &mut list, &[]).await.unwrap_err();
    assert!(matches!(err, ModelError::Timeout));

    assert_eq!(client.count(&Context::background(), &TENANT_META, &[]).await.unwrap(), 0);
}

#[tokio::test]
async fn test_cluster_lookups() {
    let client = client().await;
    let ctx = Context::background();
    let pool = client.pool();

    assert!(client.get_primary_cluster(&ctx).await.unwrap_err().is_not_found());

    pool.execute(
        "INSERT INTO clusters (name, agent_addr, mode, kube_config, \"primary\") VALUES (?, ?, ?, ?, ?)",
        &["manager".into(), "https://10.0.0.1:8041".into(), "apiServerProxy".into(), "kubeconfig".into(), true.into()],
    )
    .await
    .unwrap();
    pool.execute(
        "INSERT INTO clusters (name, agent_addr) VALUES (?, ?)",
        &["edge".into(), "https://10.0.0.2:8041".into()],
    )
    .await
    .unwrap();

    assert_eq!(client.list_cluster_names(&ctx).await.unwrap(), vec!["edge", "manager"]);

    let manager = client.get_primary_cluster(&ctx).await.unwrap();
    assert_eq!(manager.name, "manager");
    assert_eq!(manager.kube_config, "kubeconfig");

    let edge = client.get_cluster_by_name(&ctx, "edge").await.unwrap();
    assert_eq!(edge.agent_addr, "https://10.0.0.2:8041");
    assert_eq!(edge.mode, "apiServerProxy");
    // unset certificate columns read as empty
    assert_eq!(edge.agent_cert, "");

    assert!(client.get_cluster_by_name(&ctx, "nowhere").await.unwrap_err().is_not_found());
}
