// Code generated by gems-gen for the forms tree. DO NOT EDIT.
// Regenerate with `gems-gen --orm-dir <dir> --forms-dir <dir>`.

use super::*;
pub fn environment_common_to_environment(
    src: EnvironmentCommon,
) -> crate::orm::Environment {
    crate::orm::Environment {
        cluster_id: src.cluster_id,
        environment_name: src.environment_name,
        id: src.id,
        meta_type: src.meta_type,
        namespace: src.namespace,
        project_id: src.project_id,
        ..Default::default()
    }
}
pub fn environment_common_to_environment_slice(
    items: Vec<EnvironmentCommon>,
) -> Vec<crate::orm::Environment> {
    items.into_iter().map(environment_common_to_environment).collect()
}
impl From<EnvironmentCommon> for crate::orm::Environment {
    fn from(src: EnvironmentCommon) -> Self {
        environment_common_to_environment(src)
    }
}
pub fn environment_to_environment_common(
    src: crate::orm::Environment,
) -> EnvironmentCommon {
    EnvironmentCommon {
        cluster_id: src.cluster_id,
        environment_name: src.environment_name,
        id: src.id,
        meta_type: src.meta_type,
        namespace: src.namespace,
        project_id: src.project_id,
    }
}
pub fn environment_to_environment_common_slice(
    items: Vec<crate::orm::Environment>,
) -> Vec<EnvironmentCommon> {
    items.into_iter().map(environment_to_environment_common).collect()
}
impl From<crate::orm::Environment> for EnvironmentCommon {
    fn from(src: crate::orm::Environment) -> Self {
        environment_to_environment_common(src)
    }
}
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct EnvironmentCommonList {
    pub items: Vec<EnvironmentCommon>,
    #[serde(flatten)]
    pub base: gems_orm::BaseList,
}
impl EnvironmentCommonList {
    pub fn from_object_list(list: crate::orm::EnvironmentList) -> Self {
        Self {
            items: environment_to_environment_common_slice(list.items),
            base: list.base,
        }
    }
    pub fn into_object_list(self) -> crate::orm::EnvironmentList {
        crate::orm::EnvironmentList {
            items: environment_common_to_environment_slice(self.items),
            base: self.base,
        }
    }
}
pub fn project_common_to_project(src: ProjectCommon) -> crate::orm::Project {
    crate::orm::Project {
        id: src.id,
        project_alias: src.project_alias,
        project_name: src.project_name,
        tenant_id: src.tenant_id,
        ..Default::default()
    }
}
pub fn project_common_to_project_slice(
    items: Vec<ProjectCommon>,
) -> Vec<crate::orm::Project> {
    items.into_iter().map(project_common_to_project).collect()
}
impl From<ProjectCommon> for crate::orm::Project {
    fn from(src: ProjectCommon) -> Self {
        project_common_to_project(src)
    }
}
pub fn project_to_project_common(src: crate::orm::Project) -> ProjectCommon {
    ProjectCommon {
        id: src.id,
        project_alias: src.project_alias,
        project_name: src.project_name,
        tenant_id: src.tenant_id,
    }
}
pub fn project_to_project_common_slice(
    items: Vec<crate::orm::Project>,
) -> Vec<ProjectCommon> {
    items.into_iter().map(project_to_project_common).collect()
}
impl From<crate::orm::Project> for ProjectCommon {
    fn from(src: crate::orm::Project) -> Self {
        project_to_project_common(src)
    }
}
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ProjectCommonList {
    pub items: Vec<ProjectCommon>,
    #[serde(flatten)]
    pub base: gems_orm::BaseList,
}
impl ProjectCommonList {
    pub fn from_object_list(list: crate::orm::ProjectList) -> Self {
        Self {
            items: project_to_project_common_slice(list.items),
            base: list.base,
        }
    }
    pub fn into_object_list(self) -> crate::orm::ProjectList {
        crate::orm::ProjectList {
            items: project_common_to_project_slice(self.items),
            base: self.base,
        }
    }
}
pub fn project_detail_to_project(src: ProjectDetail) -> crate::orm::Project {
    crate::orm::Project {
        environments: environment_common_to_environment_slice(src.environments),
        id: src.id,
        project_alias: src.project_alias,
        project_name: src.project_name,
        remark: src.remark,
        tenant: src.tenant.map(|v| Box::new(tenant_common_to_tenant(*v))),
        ..Default::default()
    }
}
pub fn project_detail_to_project_slice(
    items: Vec<ProjectDetail>,
) -> Vec<crate::orm::Project> {
    items.into_iter().map(project_detail_to_project).collect()
}
impl From<ProjectDetail> for crate::orm::Project {
    fn from(src: ProjectDetail) -> Self {
        project_detail_to_project(src)
    }
}
pub fn project_to_project_detail(src: crate::orm::Project) -> ProjectDetail {
    ProjectDetail {
        environments: environment_to_environment_common_slice(src.environments),
        id: src.id,
        project_alias: src.project_alias,
        project_name: src.project_name,
        remark: src.remark,
        tenant: src.tenant.map(|v| Box::new(tenant_to_tenant_common(*v))),
    }
}
pub fn project_to_project_detail_slice(
    items: Vec<crate::orm::Project>,
) -> Vec<ProjectDetail> {
    items.into_iter().map(project_to_project_detail).collect()
}
impl From<crate::orm::Project> for ProjectDetail {
    fn from(src: crate::orm::Project) -> Self {
        project_to_project_detail(src)
    }
}
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ProjectDetailList {
    pub items: Vec<ProjectDetail>,
    #[serde(flatten)]
    pub base: gems_orm::BaseList,
}
impl ProjectDetailList {
    pub fn from_object_list(list: crate::orm::ProjectList) -> Self {
        Self {
            items: project_to_project_detail_slice(list.items),
            base: list.base,
        }
    }
    pub fn into_object_list(self) -> crate::orm::ProjectList {
        crate::orm::ProjectList {
            items: project_detail_to_project_slice(self.items),
            base: self.base,
        }
    }
}
pub fn system_role_common_to_system_role(
    src: SystemRoleCommon,
) -> crate::orm::SystemRole {
    crate::orm::SystemRole {
        id: src.id,
        role_code: src.role_code,
        role_name: src.role_name,
        ..Default::default()
    }
}
pub fn system_role_common_to_system_role_slice(
    items: Vec<SystemRoleCommon>,
) -> Vec<crate::orm::SystemRole> {
    items.into_iter().map(system_role_common_to_system_role).collect()
}
impl From<SystemRoleCommon> for crate::orm::SystemRole {
    fn from(src: SystemRoleCommon) -> Self {
        system_role_common_to_system_role(src)
    }
}
pub fn system_role_to_system_role_common(
    src: crate::orm::SystemRole,
) -> SystemRoleCommon {
    SystemRoleCommon {
        id: src.id,
        role_code: src.role_code,
        role_name: src.role_name,
    }
}
pub fn system_role_to_system_role_common_slice(
    items: Vec<crate::orm::SystemRole>,
) -> Vec<SystemRoleCommon> {
    items.into_iter().map(system_role_to_system_role_common).collect()
}
impl From<crate::orm::SystemRole> for SystemRoleCommon {
    fn from(src: crate::orm::SystemRole) -> Self {
        system_role_to_system_role_common(src)
    }
}
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SystemRoleCommonList {
    pub items: Vec<SystemRoleCommon>,
    #[serde(flatten)]
    pub base: gems_orm::BaseList,
}
impl SystemRoleCommonList {
    pub fn from_object_list(list: crate::orm::SystemRoleList) -> Self {
        Self {
            items: system_role_to_system_role_common_slice(list.items),
            base: list.base,
        }
    }
    pub fn into_object_list(self) -> crate::orm::SystemRoleList {
        crate::orm::SystemRoleList {
            items: system_role_common_to_system_role_slice(self.items),
            base: self.base,
        }
    }
}
pub fn tenant_common_to_tenant(src: TenantCommon) -> crate::orm::Tenant {
    crate::orm::Tenant {
        id: src.id,
        tenant_name: src.tenant_name,
        ..Default::default()
    }
}
pub fn tenant_common_to_tenant_slice(
    items: Vec<TenantCommon>,
) -> Vec<crate::orm::Tenant> {
    items.into_iter().map(tenant_common_to_tenant).collect()
}
impl From<TenantCommon> for crate::orm::Tenant {
    fn from(src: TenantCommon) -> Self {
        tenant_common_to_tenant(src)
    }
}
pub fn tenant_to_tenant_common(src: crate::orm::Tenant) -> TenantCommon {
    TenantCommon {
        id: src.id,
        tenant_name: src.tenant_name,
    }
}
pub fn tenant_to_tenant_common_slice(
    items: Vec<crate::orm::Tenant>,
) -> Vec<TenantCommon> {
    items.into_iter().map(tenant_to_tenant_common).collect()
}
impl From<crate::orm::Tenant> for TenantCommon {
    fn from(src: crate::orm::Tenant) -> Self {
        tenant_to_tenant_common(src)
    }
}
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct TenantCommonList {
    pub items: Vec<TenantCommon>,
    #[serde(flatten)]
    pub base: gems_orm::BaseList,
}
impl TenantCommonList {
    pub fn from_object_list(list: crate::orm::TenantList) -> Self {
        Self {
            items: tenant_to_tenant_common_slice(list.items),
            base: list.base,
        }
    }
    pub fn into_object_list(self) -> crate::orm::TenantList {
        crate::orm::TenantList {
            items: tenant_common_to_tenant_slice(self.items),
            base: self.base,
        }
    }
}
pub fn tenant_detail_to_tenant(src: TenantDetail) -> crate::orm::Tenant {
    crate::orm::Tenant {
        id: src.id,
        is_active: src.is_active,
        projects: project_common_to_project_slice(src.projects),
        remark: src.remark,
        tenant_name: src.tenant_name,
        ..Default::default()
    }
}
pub fn tenant_detail_to_tenant_slice(
    items: Vec<TenantDetail>,
) -> Vec<crate::orm::Tenant> {
    items.into_iter().map(tenant_detail_to_tenant).collect()
}
impl From<TenantDetail> for crate::orm::Tenant {
    fn from(src: TenantDetail) -> Self {
        tenant_detail_to_tenant(src)
    }
}
pub fn tenant_to_tenant_detail(src: crate::orm::Tenant) -> TenantDetail {
    TenantDetail {
        id: src.id,
        is_active: src.is_active,
        projects: project_to_project_common_slice(src.projects),
        remark: src.remark,
        tenant_name: src.tenant_name,
    }
}
pub fn tenant_to_tenant_detail_slice(
    items: Vec<crate::orm::Tenant>,
) -> Vec<TenantDetail> {
    items.into_iter().map(tenant_to_tenant_detail).collect()
}
impl From<crate::orm::Tenant> for TenantDetail {
    fn from(src: crate::orm::Tenant) -> Self {
        tenant_to_tenant_detail(src)
    }
}
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct TenantDetailList {
    pub items: Vec<TenantDetail>,
    #[serde(flatten)]
    pub base: gems_orm::BaseList,
}
impl TenantDetailList {
    pub fn from_object_list(list: crate::orm::TenantList) -> Self {
        Self {
            items: tenant_to_tenant_detail_slice(list.items),
            base: list.base,
        }
    }
    pub fn into_object_list(self) -> crate::orm::TenantList {
        crate::orm::TenantList {
            items: tenant_detail_to_tenant_slice(self.items),
            base: self.base,
        }
    }
}
pub fn tenant_user_rel_common_to_tenant_user_rel(
    src: TenantUserRelCommon,
) -> crate::orm::TenantUserRel {
    crate::orm::TenantUserRel {
        id: src.id,
        role: src.role,
        tenant: src.tenant.map(|v| Box::new(tenant_common_to_tenant(*v))),
        tenant_id: src.tenant_id,
        user: src.user.map(|v| Box::new(user_common_to_user(*v))),
        user_id: src.user_id,
    }
}
pub fn tenant_user_rel_common_to_tenant_user_rel_slice(
    items: Vec<TenantUserRelCommon>,
) -> Vec<crate::orm::TenantUserRel> {
    items.into_iter().map(tenant_user_rel_common_to_tenant_user_rel).collect()
}
impl From<TenantUserRelCommon> for crate::orm::TenantUserRel {
    fn from(src: TenantUserRelCommon) -> Self {
        tenant_user_rel_common_to_tenant_user_rel(src)
    }
}
pub fn tenant_user_rel_to_tenant_user_rel_common(
    src: crate::orm::TenantUserRel,
) -> TenantUserRelCommon {
    TenantUserRelCommon {
        id: src.id,
        role: src.role,
        tenant: src.tenant.map(|v| Box::new(tenant_to_tenant_common(*v))),
        tenant_id: src.tenant_id,
        user: src.user.map(|v| Box::new(user_to_user_common(*v))),
        user_id: src.user_id,
    }
}
pub fn tenant_user_rel_to_tenant_user_rel_common_slice(
    items: Vec<crate::orm::TenantUserRel>,
) -> Vec<TenantUserRelCommon> {
    items.into_iter().map(tenant_user_rel_to_tenant_user_rel_common).collect()
}
impl From<crate::orm::TenantUserRel> for TenantUserRelCommon {
    fn from(src: crate::orm::TenantUserRel) -> Self {
        tenant_user_rel_to_tenant_user_rel_common(src)
    }
}
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct TenantUserRelCommonList {
    pub items: Vec<TenantUserRelCommon>,
    #[serde(flatten)]
    pub base: gems_orm::BaseList,
}
impl TenantUserRelCommonList {
    pub fn from_object_list(list: crate::orm::TenantUserRelList) -> Self {
        Self {
            items: tenant_user_rel_to_tenant_user_rel_common_slice(list.items),
            base: list.base,
        }
    }
    pub fn into_object_list(self) -> crate::orm::TenantUserRelList {
        crate::orm::TenantUserRelList {
            items: tenant_user_rel_common_to_tenant_user_rel_slice(self.items),
            base: self.base,
        }
    }
}
pub fn user_common_to_user(src: UserCommon) -> crate::orm::User {
    crate::orm::User {
        email: src.email,
        id: src.id,
        name: src.name,
        role: src.role,
        ..Default::default()
    }
}
pub fn user_common_to_user_slice(items: Vec<UserCommon>) -> Vec<crate::orm::User> {
    items.into_iter().map(user_common_to_user).collect()
}
impl From<UserCommon> for crate::orm::User {
    fn from(src: UserCommon) -> Self {
        user_common_to_user(src)
    }
}
pub fn user_to_user_common(src: crate::orm::User) -> UserCommon {
    UserCommon {
        email: src.email,
        id: src.id,
        name: src.name,
        role: src.role,
    }
}
pub fn user_to_user_common_slice(items: Vec<crate::orm::User>) -> Vec<UserCommon> {
    items.into_iter().map(user_to_user_common).collect()
}
impl From<crate::orm::User> for UserCommon {
    fn from(src: crate::orm::User) -> Self {
        user_to_user_common(src)
    }
}
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct UserCommonList {
    pub items: Vec<UserCommon>,
    #[serde(flatten)]
    pub base: gems_orm::BaseList,
}
impl UserCommonList {
    pub fn from_object_list(list: crate::orm::UserList) -> Self {
        Self {
            items: user_to_user_common_slice(list.items),
            base: list.base,
        }
    }
    pub fn into_object_list(self) -> crate::orm::UserList {
        crate::orm::UserList {
            items: user_common_to_user_slice(self.items),
            base: self.base,
        }
    }
}
pub fn user_detail_to_user(src: UserDetail) -> crate::orm::User {
    crate::orm::User {
        email: src.email,
        id: src.id,
        is_active: src.is_active,
        name: src.name,
        phone: src.phone,
        role: src.role,
        source: src.source,
        system_role: src
            .system_role
            .map(|v| Box::new(system_role_common_to_system_role(*v))),
        system_role_id: src.system_role_id,
        ..Default::default()
    }
}
pub fn user_detail_to_user_slice(items: Vec<UserDetail>) -> Vec<crate::orm::User> {
    items.into_iter().map(user_detail_to_user).collect()
}
impl From<UserDetail> for crate::orm::User {
    fn from(src: UserDetail) -> Self {
        user_detail_to_user(src)
    }
}
pub fn user_to_user_detail(src: crate::orm::User) -> UserDetail {
    UserDetail {
        email: src.email,
        id: src.id,
        is_active: src.is_active,
        name: src.name,
        phone: src.phone,
        role: src.role,
        source: src.source,
        system_role: src
            .system_role
            .map(|v| Box::new(system_role_to_system_role_common(*v))),
        system_role_id: src.system_role_id,
    }
}
pub fn user_to_user_detail_slice(items: Vec<crate::orm::User>) -> Vec<UserDetail> {
    items.into_iter().map(user_to_user_detail).collect()
}
impl From<crate::orm::User> for UserDetail {
    fn from(src: crate::orm::User) -> Self {
        user_to_user_detail(src)
    }
}
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct UserDetailList {
    pub items: Vec<UserDetail>,
    #[serde(flatten)]
    pub base: gems_orm::BaseList,
}
impl UserDetailList {
    pub fn from_object_list(list: crate::orm::UserList) -> Self {
        Self {
            items: user_to_user_detail_slice(list.items),
            base: list.base,
        }
    }
    pub fn into_object_list(self) -> crate::orm::UserList {
        crate::orm::UserList {
            items: user_detail_to_user_slice(self.items),
            base: self.base,
        }
    }
}
