// ==========================================
// 合同状态评估引擎 - 场景测试
// ==========================================
// 测试范围:
// 1. 典型业务场景（AMC 有效/过期、保修当日、无合同、未分类原因）
// 2. 边界: 起止时刻闭区间、±1 秒
// 3. 分类: 大小写不敏感、AMC 优先
// 4. 确定性
// ==========================================

mod helpers;

use chrono::Duration;
use helpers::test_data_builder::at;
use service_call_desk::domain::{CoverageKind, CoverageStatus, SystemContract};
use service_call_desk::engine::{evaluate, ContractStatusEngine, ReasonClassifier};

fn amc_2024() -> SystemContract {
    SystemContract::from_raw(Some("2024-01-01"), Some("2024-12-31"), None)
}

// ==========================================
// 典型业务场景
// ==========================================

#[test]
fn test_场景1_amc_有效期内() {
    let eval = evaluate(&amc_2024(), Some("AMC Call"), at(2024, 6, 15));
    assert_eq!(eval.coverage_kind, CoverageKind::Amc);
    assert_eq!(eval.status, CoverageStatus::Active);
    assert_eq!(eval.chargeable_default, Some(false));
}

#[test]
fn test_场景2_amc_已过期() {
    let eval = evaluate(&amc_2024(), Some("AMC Call"), at(2025, 1, 15));
    assert_eq!(eval.coverage_kind, CoverageKind::Amc);
    assert_eq!(eval.status, CoverageStatus::Expired);
    assert_eq!(eval.chargeable_default, Some(true));
}

#[test]
fn test_场景3_保修截止当日() {
    let contract = SystemContract::from_raw(None, None, Some("2024-06-30"));
    let eval = evaluate(&contract, Some("Call Out"), at(2024, 6, 30));
    assert_eq!(eval.coverage_kind, CoverageKind::Warranty);
    assert_eq!(eval.status, CoverageStatus::Active);
    assert_eq!(eval.chargeable_default, Some(false));
}

#[test]
fn test_场景4_无合同数据() {
    for now in [at(2000, 1, 1), at(2024, 6, 15), at(2099, 12, 31)] {
        let eval = evaluate(&SystemContract::default(), Some("AMC Renewal"), now);
        assert_eq!(eval.coverage_kind, CoverageKind::Amc);
        assert_eq!(eval.status, CoverageStatus::NotFound);
        assert_eq!(eval.chargeable_default, Some(true));
    }
}

#[test]
fn test_场景5_未分类原因保持原计费标记() {
    let contract = SystemContract::from_raw(None, None, Some("2024-06-30"));
    let eval = evaluate(&contract, Some("General Enquiry"), at(2024, 1, 1));
    assert_eq!(eval.coverage_kind, CoverageKind::None);
    assert_eq!(eval.status, CoverageStatus::NotFound);
    assert_eq!(eval.chargeable_default, None);
    assert!(eval.resolve_chargeable(true));
    assert!(!eval.resolve_chargeable(false));
}

// ==========================================
// 边界
// ==========================================

#[test]
fn test_amc_边界_多个窗口() {
    let windows = [
        (at(2024, 1, 1), at(2024, 12, 31)),
        (at(2023, 2, 28), at(2023, 3, 1)),
        // 起止同一时刻
        (at(2025, 7, 4), at(2025, 7, 4)),
    ];

    for (start, end) in windows {
        let contract = SystemContract {
            amc_start_date: Some(start),
            amc_end_date: Some(end),
            warranty_date: None,
        };

        assert_eq!(evaluate(&contract, Some("AMC"), start).status, CoverageStatus::Active);
        assert_eq!(evaluate(&contract, Some("AMC"), end).status, CoverageStatus::Active);

        let after = evaluate(&contract, Some("AMC"), end + Duration::seconds(1));
        assert_eq!(after.status, CoverageStatus::Expired);
        assert_eq!(after.chargeable_default, Some(true));

        let before = evaluate(&contract, Some("AMC"), start - Duration::seconds(1));
        assert_eq!(before.status, CoverageStatus::Future);
        assert_eq!(before.chargeable_default, Some(true));
    }
}

#[test]
fn test_保修_边界() {
    for warranty in [at(2024, 6, 30), at(2030, 2, 28)] {
        let contract = SystemContract {
            warranty_date: Some(warranty),
            ..Default::default()
        };
        assert_eq!(
            evaluate(&contract, Some("Call Out"), warranty).status,
            CoverageStatus::Active
        );
        assert_eq!(
            evaluate(&contract, Some("Call Out"), warranty + Duration::seconds(1)).status,
            CoverageStatus::Expired
        );
    }
}

#[test]
fn test_无法解析的日期按缺失处理() {
    let contract = SystemContract::from_raw(Some("2024-01-01"), Some("tomorrow"), Some("n/a"));

    let amc = evaluate(&contract, Some("AMC Call"), at(2024, 6, 15));
    assert_eq!(amc.status, CoverageStatus::NotFound);
    assert_eq!(amc.chargeable_default, Some(true));

    let warranty = evaluate(&contract, Some("Call Out"), at(2024, 6, 15));
    assert_eq!(warranty.status, CoverageStatus::NotFound);
    assert_eq!(warranty.chargeable_default, Some(true));
}

// ==========================================
// 分类
// ==========================================

#[test]
fn test_原因大小写不敏感() {
    for name in ["AMC Visit", "amc visit", "Amc Visit"] {
        let eval = evaluate(&amc_2024(), Some(name), at(2024, 6, 15));
        assert_eq!(eval.coverage_kind, CoverageKind::Amc, "{}", name);
    }
}

#[test]
fn test_amc_call_out_按_amc_处理() {
    let eval = evaluate(&amc_2024(), Some("AMC Call Out"), at(2024, 6, 15));
    assert_eq!(eval.coverage_kind, CoverageKind::Amc);
    assert_eq!(eval.status, CoverageStatus::Active);
}

#[test]
fn test_自定义关键字() {
    let engine = ContractStatusEngine::new(ReasonClassifier::new("Service Plan", "Emergency"));
    let contract = SystemContract::from_raw(Some("2024-01-01"), Some("2024-12-31"), Some("2024-03-01"));

    let eval = engine.evaluate(&contract, Some("SERVICE PLAN visit"), at(2024, 6, 15));
    assert_eq!(eval.coverage_kind, CoverageKind::Amc);

    let eval = engine.evaluate(&contract, Some("emergency"), at(2024, 6, 15));
    assert_eq!(eval.coverage_kind, CoverageKind::Warranty);
    assert_eq!(eval.status, CoverageStatus::Expired);
}

// ==========================================
// 确定性
// ==========================================

#[test]
fn test_相同输入相同输出() {
    let engine = ContractStatusEngine::default();
    let contract = SystemContract::from_raw(Some("2024-01-01"), Some("2024-12-31"), Some("2024-06-30"));
    let now = at(2024, 7, 1);

    for reason in [None, Some("AMC Call"), Some("Call Out"), Some("Breakdown")] {
        let first = engine.evaluate(&contract, reason, now);
        let second = engine.evaluate(&contract, reason, now);
        assert_eq!(first, second, "{:?}", reason);
    }
}
