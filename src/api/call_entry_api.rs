// ==========================================
// 现场服务呼叫台 - 呼叫录入 API
// ==========================================
// 职责: 呼叫录入工作流
// 1. 站点/系统/原因任一变化 → 重新评估合同覆盖
// 2. 按评估结果覆写表单计费标记（不适用时保持原值）
// 3. 生成覆盖提示信息
// 4. 登记服务呼叫（需 calls 模块权限）
// ==========================================

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::api::auth::{modules, AuthorizationContext};
use crate::api::error::{ApiError, ApiResult};
use crate::config::CallDeskConfigReader;
use crate::domain::call::{CallEntryForm, CallReason, ServiceCall, SiteSystem};
use crate::domain::contract::{ContractEvaluation, SystemContract};
use crate::engine::{Advisory, ContractStatusEngine, ReasonClassifier};
use crate::repository::{CallReasonRepository, ServiceCallRepository, SiteSystemRepository};

// ==========================================
// CallEntryApi - 呼叫录入 API
// ==========================================
pub struct CallEntryApi {
    site_system_repo: Arc<SiteSystemRepository>,
    call_reason_repo: Arc<CallReasonRepository>,
    service_call_repo: Arc<ServiceCallRepository>,
    config: Arc<dyn CallDeskConfigReader>,
}

impl CallEntryApi {
    pub fn new(
        site_system_repo: Arc<SiteSystemRepository>,
        call_reason_repo: Arc<CallReasonRepository>,
        service_call_repo: Arc<ServiceCallRepository>,
        config: Arc<dyn CallDeskConfigReader>,
    ) -> Self {
        Self {
            site_system_repo,
            call_reason_repo,
            service_call_repo,
            config,
        }
    }

    /// 按当前配置构建评估引擎（关键字可在运行期调整）
    fn engine(&self) -> ApiResult<ContractStatusEngine> {
        let classifier = ReasonClassifier::from_config(self.config.as_ref())
            .map_err(|e| ApiError::InternalError(format!("读取原因关键字配置失败: {}", e)))?;
        Ok(ContractStatusEngine::new(classifier))
    }

    // ==========================================
    // 参考数据查询
    // ==========================================

    pub fn list_reasons(&self) -> ApiResult<Vec<CallReason>> {
        Ok(self.call_reason_repo.list_all()?)
    }

    pub fn list_systems(&self, site_id: &str) -> ApiResult<Vec<SiteSystem>> {
        let site_id = require_id("站点ID", site_id)?;
        Ok(self.site_system_repo.list_by_site(site_id)?)
    }

    // ==========================================
    // 表单工作流
    // ==========================================

    /// 新建呼叫录入表单（计费标记取配置初值）
    pub fn new_form(&self) -> ApiResult<CallEntryForm> {
        let default_chargeable = self
            .config
            .get_default_chargeable()
            .map_err(|e| ApiError::InternalError(format!("读取计费默认值失败: {}", e)))?;
        Ok(CallEntryForm::new(default_chargeable))
    }

    /// 选择站点（站点变化时清空已选系统）
    #[instrument(skip(self, form))]
    pub fn select_site(
        &self,
        form: &mut CallEntryForm,
        site_id: Option<&str>,
        now: DateTime<Utc>,
    ) -> ApiResult<ContractEvaluation> {
        let site_id = normalize_selection(site_id);
        if form.site_id != site_id {
            form.system_id = None;
        }
        form.site_id = site_id;
        self.reevaluate(form, now)
    }

    /// 选择系统（须先选择站点）
    #[instrument(skip(self, form))]
    pub fn select_system(
        &self,
        form: &mut CallEntryForm,
        system_id: Option<&str>,
        now: DateTime<Utc>,
    ) -> ApiResult<ContractEvaluation> {
        let system_id = normalize_selection(system_id);
        if system_id.is_some() && form.site_id.is_none() {
            return Err(ApiError::InvalidInput("请先选择站点".to_string()));
        }
        form.system_id = system_id;
        self.reevaluate(form, now)
    }

    /// 选择呼叫原因
    #[instrument(skip(self, form))]
    pub fn select_reason(
        &self,
        form: &mut CallEntryForm,
        reason_id: Option<&str>,
        now: DateTime<Utc>,
    ) -> ApiResult<ContractEvaluation> {
        form.reason_id = normalize_selection(reason_id);
        self.reevaluate(form, now)
    }

    /// 按表单当前选择重新评估，并把结果写回表单
    pub fn reevaluate(
        &self,
        form: &mut CallEntryForm,
        now: DateTime<Utc>,
    ) -> ApiResult<ContractEvaluation> {
        let evaluation = self.evaluate_selection(
            form.site_id.as_deref(),
            form.system_id.as_deref(),
            form.reason_id.as_deref(),
            now,
        )?;
        form.apply_evaluation(evaluation);
        Ok(evaluation)
    }

    /// 只读评估（不修改任何表单）
    ///
    /// # 说明
    /// - 未选择系统时按"无合同数据"评估
    /// - 已选择但不存在的系统/原因返回 NotFound
    pub fn evaluate_selection(
        &self,
        site_id: Option<&str>,
        system_id: Option<&str>,
        reason_id: Option<&str>,
        now: DateTime<Utc>,
    ) -> ApiResult<ContractEvaluation> {
        let contract = self.load_contract(site_id, system_id)?;
        let reason_name = self.load_reason_name(reason_id)?;
        Ok(self.engine()?.evaluate(&contract, reason_name.as_deref(), now))
    }

    /// 当前表单对应的覆盖提示
    pub fn advisory(&self, form: &CallEntryForm) -> ApiResult<Option<Advisory>> {
        let evaluation = match form.evaluation {
            Some(evaluation) => evaluation,
            None => return Ok(None),
        };
        let contract = self.load_contract(form.site_id.as_deref(), form.system_id.as_deref())?;
        Ok(Advisory::render(&evaluation, &contract))
    }

    // ==========================================
    // 登记呼叫
    // ==========================================

    /// 登记服务呼叫
    ///
    /// # 说明
    /// - 计费标记以表单为准（允许人工改写评估给出的默认值）
    /// - 覆盖类型/状态在登记时刻重新评估，避免使用过期的表单结果
    #[instrument(skip(self, form, auth, notes), fields(user_id = %auth.user_id()))]
    pub fn submit(
        &self,
        form: &CallEntryForm,
        auth: &dyn AuthorizationContext,
        notes: Option<&str>,
        now: DateTime<Utc>,
    ) -> ApiResult<ServiceCall> {
        require_permission(auth, modules::CALLS)?;

        if !form.is_complete() {
            return Err(ApiError::InvalidInput(
                "站点、系统、呼叫原因均须选择".to_string(),
            ));
        }
        let site_id = form.site_id.clone().unwrap_or_default();
        let system_id = form.system_id.clone().unwrap_or_default();
        let reason_id = form.reason_id.clone().unwrap_or_default();

        let evaluation = self.evaluate_selection(
            Some(&site_id),
            Some(&system_id),
            Some(&reason_id),
            now,
        )?;

        let call = ServiceCall {
            call_id: Uuid::new_v4().to_string(),
            site_id,
            system_id,
            reason_id,
            chargeable: form.chargeable,
            coverage_kind: evaluation.coverage_kind,
            coverage_status: evaluation.status,
            logged_by: auth.user_id().to_string(),
            logged_at: now,
            notes: notes
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string),
        };
        self.service_call_repo.insert(&call)?;

        info!(
            call_id = %call.call_id,
            site_id = %call.site_id,
            system_id = %call.system_id,
            chargeable = call.chargeable,
            coverage_kind = %call.coverage_kind,
            coverage_status = %call.coverage_status,
            "服务呼叫已登记"
        );
        Ok(call)
    }

    /// 查询站点已登记呼叫（需 calls 模块权限）
    pub fn list_calls(
        &self,
        site_id: &str,
        auth: &dyn AuthorizationContext,
    ) -> ApiResult<Vec<ServiceCall>> {
        require_permission(auth, modules::CALLS)?;
        let site_id = require_id("站点ID", site_id)?;
        Ok(self.service_call_repo.list_by_site(site_id)?)
    }

    // ==========================================
    // 内部辅助
    // ==========================================

    fn load_contract(
        &self,
        site_id: Option<&str>,
        system_id: Option<&str>,
    ) -> ApiResult<SystemContract> {
        let (site_id, system_id) = match (site_id, system_id) {
            (Some(site), Some(system)) => (site, system),
            _ => return Ok(SystemContract::default()),
        };

        let system = self
            .site_system_repo
            .find_by_key(site_id, system_id)?
            .ok_or_else(|| {
                ApiError::NotFound(format!("站点系统(site_id={}, system_id={})不存在", site_id, system_id))
            })?;
        Ok(system.contract)
    }

    fn load_reason_name(&self, reason_id: Option<&str>) -> ApiResult<Option<String>> {
        let reason_id = match reason_id {
            Some(id) => id,
            None => return Ok(None),
        };

        let reason = self
            .call_reason_repo
            .find_by_id(reason_id)?
            .ok_or_else(|| ApiError::NotFound(format!("呼叫原因(id={})不存在", reason_id)))?;
        Ok(Some(reason.name))
    }
}

fn normalize_selection(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn require_id<'a>(label: &str, value: &'a str) -> ApiResult<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ApiError::InvalidInput(format!("{}不能为空", label)));
    }
    Ok(trimmed)
}

fn require_permission(auth: &dyn AuthorizationContext, module: &str) -> ApiResult<()> {
    if auth.has_permission(module) {
        Ok(())
    } else {
        tracing::warn!(user_id = auth.user_id(), module = module, "权限校验未通过");
        Err(ApiError::PermissionDenied {
            user_id: auth.user_id().to_string(),
            module: module.to_string(),
        })
    }
}
