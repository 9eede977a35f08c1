// Code generated by gems-gen for the orm tree. DO NOT EDIT.
// Regenerate with `gems-gen --orm-dir <dir> --forms-dir <dir>`.

use super::*;
/// Metadata of [`Cluster`]
pub const CLUSTER_META: gems_orm::TypeMeta = gems_orm::TypeMeta {
    kind: "cluster",
    table: "clusters",
    pk_field: "id",
    valid_preloads: &["environments"],
    columns: &[
        "id",
        "name",
        "api_server",
        "agent_addr",
        "mode",
        "agent_cert",
        "agent_key",
        "agent_ca",
        "kube_config",
        "primary",
    ],
    search_fields: &["name"],
    preloads: &[
        gems_orm::Preload {
            field: "environments",
            target_table: "environments",
            target_pk: "id",
            fk_column: "cluster_id",
            kind: gems_orm::PreloadKind::HasMany,
        },
    ],
};
impl gems_orm::ObjectType for Cluster {
    fn meta(&self) -> &'static gems_orm::TypeMeta {
        &CLUSTER_META
    }
}
impl gems_orm::Object for Cluster {
    const META: &'static gems_orm::TypeMeta = &CLUSTER_META;
    fn pk_value(&self) -> gems_orm::DatabaseValue {
        gems_orm::DatabaseValue::from(self.id)
    }
    fn set_pk_value(&mut self, value: gems_orm::DatabaseValue) {
        if let Some(pk) = value.as_i64().and_then(|v| <i64>::try_from(v).ok()) {
            self.id = pk;
        }
    }
}
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ClusterList {
    pub items: Vec<Cluster>,
    #[serde(flatten)]
    pub base: gems_orm::BaseList,
}
impl gems_orm::ObjectType for ClusterList {
    fn meta(&self) -> &'static gems_orm::TypeMeta {
        &CLUSTER_META
    }
}
impl gems_orm::ObjectList for ClusterList {
    type Item = Cluster;
    fn items(&self) -> &[Cluster] {
        &self.items
    }
    fn items_mut(&mut self) -> &mut Vec<Cluster> {
        &mut self.items
    }
    fn page_size(&self) -> (i64, i64) {
        (self.base.page, self.base.size)
    }
    fn set_page_size(&mut self, page: i64, size: i64) {
        self.base.page = page;
        self.base.size = size;
    }
    fn total(&self) -> i64 {
        self.base.total
    }
    fn set_total(&mut self, total: i64) {
        self.base.total = total;
    }
}
/// Metadata of [`Environment`]
pub const ENVIRONMENT_META: gems_orm::TypeMeta = gems_orm::TypeMeta {
    kind: "environment",
    table: "environments",
    pk_field: "id",
    valid_preloads: &["project", "cluster"],
    columns: &[
        "id",
        "environment_name",
        "namespace",
        "meta_type",
        "delete_policy",
        "remark",
        "limit_range",
        "resource_quota",
        "project_id",
        "cluster_id",
    ],
    search_fields: &["environment_name", "namespace"],
    preloads: &[
        gems_orm::Preload {
            field: "project",
            target_table: "projects",
            target_pk: "id",
            fk_column: "project_id",
            kind: gems_orm::PreloadKind::BelongsTo,
        },
        gems_orm::Preload {
            field: "cluster",
            target_table: "clusters",
            target_pk: "id",
            fk_column: "cluster_id",
            kind: gems_orm::PreloadKind::BelongsTo,
        },
    ],
};
impl gems_orm::ObjectType for Environment {
    fn meta(&self) -> &'static gems_orm::TypeMeta {
        &ENVIRONMENT_META
    }
}
impl gems_orm::Object for Environment {
    const META: &'static gems_orm::TypeMeta = &ENVIRONMENT_META;
    fn pk_value(&self) -> gems_orm::DatabaseValue {
        gems_orm::DatabaseValue::from(self.id)
    }
    fn set_pk_value(&mut self, value: gems_orm::DatabaseValue) {
        if let Some(pk) = value.as_i64().and_then(|v| <i64>::try_from(v).ok()) {
            self.id = pk;
        }
    }
}
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct EnvironmentList {
    pub items: Vec<Environment>,
    #[serde(flatten)]
    pub base: gems_orm::BaseList,
}
impl gems_orm::ObjectType for EnvironmentList {
    fn meta(&self) -> &'static gems_orm::TypeMeta {
        &ENVIRONMENT_META
    }
}
impl gems_orm::ObjectList for EnvironmentList {
    type Item = Environment;
    fn items(&self) -> &[Environment] {
        &self.items
    }
    fn items_mut(&mut self) -> &mut Vec<Environment> {
        &mut self.items
    }
    fn page_size(&self) -> (i64, i64) {
        (self.base.page, self.base.size)
    }
    fn set_page_size(&mut self, page: i64, size: i64) {
        self.base.page = page;
        self.base.size = size;
    }
    fn total(&self) -> i64 {
        self.base.total
    }
    fn set_total(&mut self, total: i64) {
        self.base.total = total;
    }
}
/// Metadata of [`Project`]
pub const PROJECT_META: gems_orm::TypeMeta = gems_orm::TypeMeta {
    kind: "project",
    table: "projects",
    pk_field: "id",
    valid_preloads: &["tenant", "environments"],
    columns: &["id", "project_name", "project_alias", "remark", "tenant_id"],
    search_fields: &["project_name", "project_alias"],
    preloads: &[
        gems_orm::Preload {
            field: "tenant",
            target_table: "tenants",
            target_pk: "id",
            fk_column: "tenant_id",
            kind: gems_orm::PreloadKind::BelongsTo,
        },
        gems_orm::Preload {
            field: "environments",
            target_table: "environments",
            target_pk: "id",
            fk_column: "project_id",
            kind: gems_orm::PreloadKind::HasMany,
        },
    ],
};
impl gems_orm::ObjectType for Project {
    fn meta(&self) -> &'static gems_orm::TypeMeta {
        &PROJECT_META
    }
}
impl gems_orm::Object for Project {
    const META: &'static gems_orm::TypeMeta = &PROJECT_META;
    fn pk_value(&self) -> gems_orm::DatabaseValue {
        gems_orm::DatabaseValue::from(self.id)
    }
    fn set_pk_value(&mut self, value: gems_orm::DatabaseValue) {
        if let Some(pk) = value.as_i64().and_then(|v| <i64>::try_from(v).ok()) {
            self.id = pk;
        }
    }
}
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ProjectList {
    pub items: Vec<Project>,
    #[serde(flatten)]
    pub base: gems_orm::BaseList,
}
impl gems_orm::ObjectType for ProjectList {
    fn meta(&self) -> &'static gems_orm::TypeMeta {
        &PROJECT_META
    }
}
impl gems_orm::ObjectList for ProjectList {
    type Item = Project;
    fn items(&self) -> &[Project] {
        &self.items
    }
    fn items_mut(&mut self) -> &mut Vec<Project> {
        &mut self.items
    }
    fn page_size(&self) -> (i64, i64) {
        (self.base.page, self.base.size)
    }
    fn set_page_size(&mut self, page: i64, size: i64) {
        self.base.page = page;
        self.base.size = size;
    }
    fn total(&self) -> i64 {
        self.base.total
    }
    fn set_total(&mut self, total: i64) {
        self.base.total = total;
    }
}
/// Metadata of [`SystemRole`]
pub const SYSTEM_ROLE_META: gems_orm::TypeMeta = gems_orm::TypeMeta {
    kind: "system_role",
    table: "system_roles",
    pk_field: "id",
    valid_preloads: &["users"],
    columns: &["id", "role_name", "role_code"],
    search_fields: &[],
    preloads: &[
        gems_orm::Preload {
            field: "users",
            target_table: "users",
            target_pk: "id",
            fk_column: "system_role_id",
            kind: gems_orm::PreloadKind::HasMany,
        },
    ],
};
impl gems_orm::ObjectType for SystemRole {
    fn meta(&self) -> &'static gems_orm::TypeMeta {
        &SYSTEM_ROLE_META
    }
}
impl gems_orm::Object for SystemRole {
    const META: &'static gems_orm::TypeMeta = &SYSTEM_ROLE_META;
    fn pk_value(&self) -> gems_orm::DatabaseValue {
        gems_orm::DatabaseValue::from(self.id)
    }
    fn set_pk_value(&mut self, value: gems_orm::DatabaseValue) {
        if let Some(pk) = value.as_i64().and_then(|v| <i64>::try_from(v).ok()) {
            self.id = pk;
        }
    }
}
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SystemRoleList {
    pub items: Vec<SystemRole>,
    #[serde(flatten)]
    pub base: gems_orm::BaseList,
}
impl gems_orm::ObjectType for SystemRoleList {
    fn meta(&self) -> &'static gems_orm::TypeMeta {
        &SYSTEM_ROLE_META
    }
}
impl gems_orm::ObjectList for SystemRoleList {
    type Item = SystemRole;
    fn items(&self) -> &[SystemRole] {
        &self.items
    }
    fn items_mut(&mut self) -> &mut Vec<SystemRole> {
        &mut self.items
    }
    fn page_size(&self) -> (i64, i64) {
        (self.base.page, self.base.size)
    }
    fn set_page_size(&mut self, page: i64, size: i64) {
        self.base.page = page;
        self.base.size = size;
    }
    fn total(&self) -> i64 {
        self.base.total
    }
    fn set_total(&mut self, total: i64) {
        self.base.total = total;
    }
}
/// Metadata of [`Tenant`]
pub const TENANT_META: gems_orm::TypeMeta = gems_orm::TypeMeta {
    kind: "tenant",
    table: "tenants",
    pk_field: "id",
    valid_preloads: &["users", "projects", "resource_quotas"],
    columns: &["id", "tenant_name", "remark", "is_active"],
    search_fields: &["tenant_name"],
    preloads: &[
        gems_orm::Preload {
            field: "users",
            target_table: "users",
            target_pk: "id",
            fk_column: "tenant_id",
            kind: gems_orm::PreloadKind::ManyToMany {
                via_table: "tenant_user_rels",
                via_target_fk: "user_id",
            },
        },
        gems_orm::Preload {
            field: "projects",
            target_table: "projects",
            target_pk: "id",
            fk_column: "tenant_id",
            kind: gems_orm::PreloadKind::HasMany,
        },
        gems_orm::Preload {
            field: "resource_quotas",
            target_table: "tenant_resource_quotas",
            target_pk: "id",
            fk_column: "tenant_id",
            kind: gems_orm::PreloadKind::HasMany,
        },
    ],
};
impl gems_orm::ObjectType for Tenant {
    fn meta(&self) -> &'static gems_orm::TypeMeta {
        &TENANT_META
    }
}
impl gems_orm::Object for Tenant {
    const META: &'static gems_orm::TypeMeta = &TENANT_META;
    fn pk_value(&self) -> gems_orm::DatabaseValue {
        gems_orm::DatabaseValue::from(self.id)
    }
    fn set_pk_value(&mut self, value: gems_orm::DatabaseValue) {
        if let Some(pk) = value.as_i64().and_then(|v| <i64>::try_from(v).ok()) {
            self.id = pk;
        }
    }
}
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct TenantList {
    pub items: Vec<Tenant>,
    #[serde(flatten)]
    pub base: gems_orm::BaseList,
}
impl gems_orm::ObjectType for TenantList {
    fn meta(&self) -> &'static gems_orm::TypeMeta {
        &TENANT_META
    }
}
impl gems_orm::ObjectList for TenantList {
    type Item = Tenant;
    fn items(&self) -> &[Tenant] {
        &self.items
    }
    fn items_mut(&mut self) -> &mut Vec<Tenant> {
        &mut self.items
    }
    fn page_size(&self) -> (i64, i64) {
        (self.base.page, self.base.size)
    }
    fn set_page_size(&mut self, page: i64, size: i64) {
        self.base.page = page;
        self.base.size = size;
    }
    fn total(&self) -> i64 {
        self.base.total
    }
    fn set_total(&mut self, total: i64) {
        self.base.total = total;
    }
}
/// Metadata of [`TenantResourceQuota`]
pub const TENANT_RESOURCE_QUOTA_META: gems_orm::TypeMeta = gems_orm::TypeMeta {
    kind: "tenant_resource_quota",
    table: "tenant_resource_quotas",
    pk_field: "id",
    valid_preloads: &["tenant", "cluster"],
    columns: &["id", "content", "tenant_id", "cluster_id"],
    search_fields: &[],
    preloads: &[
        gems_orm::Preload {
            field: "tenant",
            target_table: "tenants",
            target_pk: "id",
            fk_column: "tenant_id",
            kind: gems_orm::PreloadKind::BelongsTo,
        },
        gems_orm::Preload {
            field: "cluster",
            target_table: "clusters",
            target_pk: "id",
            fk_column: "cluster_id",
            kind: gems_orm::PreloadKind::BelongsTo,
        },
    ],
};
impl gems_orm::ObjectType for TenantResourceQuota {
    fn meta(&self) -> &'static gems_orm::TypeMeta {
        &TENANT_RESOURCE_QUOTA_META
    }
}
impl gems_orm::Object for TenantResourceQuota {
    const META: &'static gems_orm::TypeMeta = &TENANT_RESOURCE_QUOTA_META;
    fn pk_value(&self) -> gems_orm::DatabaseValue {
        gems_orm::DatabaseValue::from(self.id)
    }
    fn set_pk_value(&mut self, value: gems_orm::DatabaseValue) {
        if let Some(pk) = value.as_i64().and_then(|v| <i64>::try_from(v).ok()) {
            self.id = pk;
        }
    }
}
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct TenantResourceQuotaList {
    pub items: Vec<TenantResourceQuota>,
    #[serde(flatten)]
    pub base: gems_orm::BaseList,
}
impl gems_orm::ObjectType for TenantResourceQuotaList {
    fn meta(&self) -> &'static gems_orm::TypeMeta {
        &TENANT_RESOURCE_QUOTA_META
    }
}
impl gems_orm::ObjectList for TenantResourceQuotaList {
    type Item = TenantResourceQuota;
    fn items(&self) -> &[TenantResourceQuota] {
        &self.items
    }
    fn items_mut(&mut self) -> &mut Vec<TenantResourceQuota> {
        &mut self.items
    }
    fn page_size(&self) -> (i64, i64) {
        (self.base.page, self.base.size)
    }
    fn set_page_size(&mut self, page: i64, size: i64) {
        self.base.page = page;
        self.base.size = size;
    }
    fn total(&self) -> i64 {
        self.base.total
    }
    fn set_total(&mut self, total: i64) {
        self.base.total = total;
    }
}
/// Metadata of [`TenantUserRel`]
pub const TENANT_USER_REL_META: gems_orm::TypeMeta = gems_orm::TypeMeta {
    kind: "tenant_user_rel",
    table: "tenant_user_rels",
    pk_field: "id",
    valid_preloads: &["tenant", "user"],
    columns: &["id", "tenant_id", "user_id", "role"],
    search_fields: &[],
    preloads: &[
        gems_orm::Preload {
            field: "tenant",
            target_table: "tenants",
            target_pk: "id",
            fk_column: "tenant_id",
            kind: gems_orm::PreloadKind::BelongsTo,
        },
        gems_orm::Preload {
            field: "user",
            target_table: "users",
            target_pk: "id",
            fk_column: "user_id",
            kind: gems_orm::PreloadKind::BelongsTo,
        },
    ],
};
impl gems_orm::ObjectType for TenantUserRel {
    fn meta(&self) -> &'static gems_orm::TypeMeta {
        &TENANT_USER_REL_META
    }
}
impl gems_orm::Object for TenantUserRel {
    const META: &'static gems_orm::TypeMeta = &TENANT_USER_REL_META;
    fn pk_value(&self) -> gems_orm::DatabaseValue {
        gems_orm::DatabaseValue::from(self.id)
    }
    fn set_pk_value(&mut self, value: gems_orm::DatabaseValue) {
        if let Some(pk) = value.as_i64().and_then(|v| <i64>::try_from(v).ok()) {
            self.id = pk;
        }
    }
}
impl gems_orm::RelationShip for TenantUserRel {
    fn left(&self) -> gems_orm::RelationEnd {
        gems_orm::RelationEnd {
            meta: <Tenant as gems_orm::Object>::META,
            pk: gems_orm::DatabaseValue::from(self.tenant_id),
        }
    }
    fn right(&self) -> gems_orm::RelationEnd {
        gems_orm::RelationEnd {
            meta: <User as gems_orm::Object>::META,
            pk: gems_orm::DatabaseValue::from(self.user_id),
        }
    }
}
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct TenantUserRelList {
    pub items: Vec<TenantUserRel>,
    #[serde(flatten)]
    pub base: gems_orm::BaseList,
}
impl gems_orm::ObjectType for TenantUserRelList {
    fn meta(&self) -> &'static gems_orm::TypeMeta {
        &TENANT_USER_REL_META
    }
}
impl gems_orm::ObjectList for TenantUserRelList {
    type Item = TenantUserRel;
    fn items(&self) -> &[TenantUserRel] {
        &self.items
    }
    fn items_mut(&mut self) -> &mut Vec<TenantUserRel> {
        &mut self.items
    }
    fn page_size(&self) -> (i64, i64) {
        (self.base.page, self.base.size)
    }
    fn set_page_size(&mut self, page: i64, size: i64) {
        self.base.page = page;
        self.base.size = size;
    }
    fn total(&self) -> i64 {
        self.base.total
    }
    fn set_total(&mut self, total: i64) {
        self.base.total = total;
    }
}
/// Metadata of [`User`]
pub const USER_META: gems_orm::TypeMeta = gems_orm::TypeMeta {
    kind: "user",
    table: "users",
    pk_field: "id",
    valid_preloads: &["system_role"],
    columns: &["id", "name", "email", "phone", "source", "is_active", "system_role_id"],
    search_fields: &["name", "email"],
    preloads: &[
        gems_orm::Preload {
            field: "system_role",
            target_table: "system_roles",
            target_pk: "id",
            fk_column: "system_role_id",
            kind: gems_orm::PreloadKind::BelongsTo,
        },
        gems_orm::Preload {
            field: "tenants",
            target_table: "tenants",
            target_pk: "id",
            fk_column: "user_id",
            kind: gems_orm::PreloadKind::ManyToMany {
                via_table: "tenant_user_rels",
                via_target_fk: "tenant_id",
            },
        },
    ],
};
impl gems_orm::ObjectType for User {
    fn meta(&self) -> &'static gems_orm::TypeMeta {
        &USER_META
    }
}
impl gems_orm::Object for User {
    const META: &'static gems_orm::TypeMeta = &USER_META;
    fn pk_value(&self) -> gems_orm::DatabaseValue {
        gems_orm::DatabaseValue::from(self.id)
    }
    fn set_pk_value(&mut self, value: gems_orm::DatabaseValue) {
        if let Some(pk) = value.as_i64().and_then(|v| <i64>::try_from(v).ok()) {
            self.id = pk;
        }
    }
}
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct UserList {
    pub items: Vec<User>,
    #[serde(flatten)]
    pub base: gems_orm::BaseList,
}
impl gems_orm::ObjectType for UserList {
    fn meta(&self) -> &'static gems_orm::TypeMeta {
        &USER_META
    }
}
impl gems_orm::ObjectList for UserList {
    type Item = User;
    fn items(&self) -> &[User] {
        &self.items
    }
    fn items_mut(&mut self) -> &mut Vec<User> {
        &mut self.items
    }
    fn page_size(&self) -> (i64, i64) {
        (self.base.page, self.base.size)
    }
    fn set_page_size(&mut self, page: i64, size: i64) {
        self.base.page = page;
        self.base.size = size;
    }
    fn total(&self) -> i64 {
        self.base.total
    }
    fn set_total(&mut self, total: i64) {
        self.base.total = total;
    }
}
