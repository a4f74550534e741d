//! Payroll Projector (C7, spec §4.7): projects an attendance range, approved
//! leave/delay inputs, and `CompanySettings` into pay figures.
//!
//! Grounded on the distinct-day accounting rule in
//! `domains::attendance::repository::project_distinct_days` (§4.3) — this
//! module is the sole consumer of that projection outside of tests.

use std::collections::HashMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::common::error::AppError;
use crate::domains::attendance::{project_distinct_days, AttendanceLog};
use crate::domains::company::{ApprovedDelayPermission, ApprovedLeaveDay, Company, CompanySettings, InsuranceTaxKind};

use super::models::{PayrollInput, PayrollResult};

/// Run the projection (spec §4.7). All division is guarded against a
/// misconfigured `workdays_per_month = 0`, which would otherwise make every
/// downstream ratio undefined.
pub async fn project(input: PayrollInput, pool: &PgPool) -> Result<PayrollResult, AppError> {
    if input.to < input.from {
        return Err(AppError::Validation("payroll range `to` precedes `from`".to_string()));
    }

    let company = Company::find_by_id(input.company_id, pool)
        .await
        .map_err(AppError::Internal)?
        .ok_or_else(|| AppError::NotFound("company".to_string()))?;
    let tz: chrono_tz::Tz = company.timezone.parse().unwrap_or(chrono_tz::Tz::UTC);

    let settings = CompanySettings::find_by_company(input.company_id, pool)
        .await
        .map_err(AppError::Internal)?
        .ok_or_else(|| AppError::NotFound("company_settings".to_string()))?;

    let sessions = AttendanceLog::list(input.company_id, input.employee_id, input.from, input.to, pool)
        .await
        .map_err(AppError::Internal)?;
    let distinct_days = project_distinct_days(&sessions, tz);

    let leave_days = ApprovedLeaveDay::find_in_range(input.employee_id, input.company_id, input.from, input.to, pool)
        .await
        .map_err(AppError::Internal)?;
    let delay_permissions =
        ApprovedDelayPermission::find_in_range(input.employee_id, input.company_id, input.from, input.to, pool)
            .await
            .map_err(AppError::Internal)?;

    Ok(compute(&input, &settings, &distinct_days, &leave_days, &delay_permissions))
}

/// Pure arithmetic core, separated from I/O so it can be property-tested
/// without a database (P5, P6, S6, S7 in spec §8).
pub fn compute(
    input: &PayrollInput,
    settings: &CompanySettings,
    distinct_days: &[crate::domains::attendance::DistinctDay],
    leave_days: &[ApprovedLeaveDay],
    delay_permissions: &[ApprovedDelayPermission],
) -> PayrollResult {
    let working_days_in_month = settings.workdays_per_month;
    let range_days = (input.to - input.from).num_days() + 1;
    let working_days_in_range = range_days.min(working_days_in_month as i64);

    let present_days_in_range = (distinct_days.len() as i64).min(working_days_in_range);

    let approved_leave_days_in_range = leave_days.len() as i64;

    let workdays_decimal = Decimal::from(working_days_in_month.max(1));
    let daily_rate = input.base_monthly_salary / workdays_decimal;

    let present_decimal = Decimal::from(present_days_in_range);
    let base_pay_for_range = daily_rate * present_decimal;
    let allowances_for_range = (input.monthly_allowances / workdays_decimal) * present_decimal;

    // P6: absence never goes negative even if leave alone would cover the
    // whole range (or exceed present+range bookkeeping due to bad input data).
    let absence_days_in_range =
        (working_days_in_range - present_days_in_range - approved_leave_days_in_range).max(0);
    let absence_deduction = Decimal::from(absence_days_in_range) * daily_rate;

    // Lateness (S7): per-day max late minutes minus that day's approved
    // delay-permission minutes, floored at zero, summed across the range.
    let delay_by_day: HashMap<NaiveDate, i32> = delay_permissions
        .iter()
        .map(|permission| (permission.day, permission.minutes))
        .collect();

    let lateness_minutes_deducted: i64 = distinct_days
        .iter()
        .map(|day| {
            let excused = delay_by_day.get(&day.day).copied().unwrap_or(0);
            (day.max_late_minutes - excused).max(0) as i64
        })
        .sum();

    // Slab rule: a late minute costs the same fraction of a day that it is
    // of a standard shift day, applied against the daily rate. Open Question
    // in spec §9 left the exact monetary slab undefined; this is the policy
    // this implementation picked (documented in DESIGN.md).
    let shift_minutes = (settings.shift_hours_per_day * Decimal::from(60)).max(Decimal::ONE);
    let per_minute_rate = daily_rate / shift_minutes;
    let lateness_deduction = per_minute_rate * Decimal::from(lateness_minutes_deducted);

    let hourly_rate = if settings.shift_hours_per_day.is_zero() {
        Decimal::ZERO
    } else {
        daily_rate / settings.shift_hours_per_day
    };
    let overtime_pay = hourly_rate * settings.overtime_multiplier * input.overtime_hours;

    // Insurance/tax: computed on the *full monthly* salary, then pro-rated
    // to the range by `present_days_in_range / working_days_in_month` (spec
    // §4.7, and the Open Question in §9 that fixes this interpretation).
    let proration = present_decimal / workdays_decimal;
    let insurance_full = apply_kind(settings.insurance_type, settings.insurance_value, input.base_monthly_salary);
    let tax_full = apply_kind(settings.tax_type, settings.tax_value, input.base_monthly_salary);
    let insurance_for_range = insurance_full * proration;
    let tax_for_range = tax_full * proration;

    let net = base_pay_for_range + allowances_for_range + overtime_pay + input.bonuses
        - absence_deduction
        - lateness_deduction
        - input.penalties
        - insurance_for_range
        - tax_for_range;

    PayrollResult {
        working_days_in_month,
        range_days,
        working_days_in_range,
        present_days_in_range,
        absence_days_in_range,
        approved_leave_days_in_range,
        daily_rate,
        base_pay_for_range,
        allowances_for_range,
        absence_deduction,
        lateness_minutes_deducted,
        lateness_deduction,
        overtime_pay,
        insurance_for_range,
        tax_for_range,
        bonuses: input.bonuses,
        penalties: input.penalties,
        net,
    }
}

fn apply_kind(kind: InsuranceTaxKind, value: Decimal, monthly_salary: Decimal) -> Decimal {
    match kind {
        InsuranceTaxKind::Percentage => monthly_salary * value,
        InsuranceTaxKind::Fixed => value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::entity_ids::{CompanyId, CompanySettingsId, EmployeeId};
    use crate::domains::attendance::DistinctDay;
    use chrono::NaiveDate;

    fn settings() -> CompanySettings {
        CompanySettings {
            id: CompanySettingsId::new(),
            company_id: CompanyId::new(),
            auto_checkout_enabled: true,
            auto_checkout_after_seconds: 900,
            verify_outside_with_n_readings: 3,
            workdays_per_month: 26,
            currency: "SAR".to_string(),
            insurance_type: InsuranceTaxKind::Percentage,
            insurance_value: Decimal::new(0, 0),
            tax_type: InsuranceTaxKind::Percentage,
            tax_value: Decimal::new(0, 0),
            overtime_multiplier: Decimal::new(15, 1),
            shift_hours_per_day: Decimal::from(8),
            grace_minutes: 15,
            weekly_off_days: vec![5, 6],
        }
    }

    fn input(from: NaiveDate, to: NaiveDate) -> PayrollInput {
        PayrollInput {
            employee_id: EmployeeId::new(),
            company_id: CompanyId::new(),
            from,
            to,
            base_monthly_salary: Decimal::from(6000),
            monthly_allowances: Decimal::ZERO,
            overtime_hours: Decimal::ZERO,
            bonuses: Decimal::ZERO,
            penalties: Decimal::ZERO,
        }
    }

    /// S6 from spec §8: sessions on days 2, 5, 8 in [1,10] (day 15 outside
    /// the range never counts); a duplicate session on day 5 (P5) must not
    /// change the result.
    #[test]
    fn s6_payroll_distinct_day_accounting() {
        let from = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        let to = NaiveDate::from_ymd_opt(2026, 1, 10).unwrap();
        let days = vec![
            DistinctDay { day: NaiveDate::from_ymd_opt(2026, 1, 2).unwrap(), max_late_minutes: 0 },
            DistinctDay { day: NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(), max_late_minutes: 0 },
            DistinctDay { day: NaiveDate::from_ymd_opt(2026, 1, 8).unwrap(), max_late_minutes: 0 },
        ];

        let result = compute(&input(from, to), &settings(), &days, &[], &[]);

        assert_eq!(result.present_days_in_range, 3);
        assert_eq!(result.absence_days_in_range, 7);
        assert!((result.base_pay_for_range - Decimal::new(69231, 2)).abs() < Decimal::new(5, 2));
        assert!((result.absence_deduction - Decimal::new(161538, 2)).abs() < Decimal::new(5, 2));
    }

    /// A second session on an already-present day never changes the count (P5).
    #[test]
    fn p5_second_session_same_day_does_not_increase_present_days() {
        let from = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        let to = NaiveDate::from_ymd_opt(2026, 1, 10).unwrap();
        let one_day = vec![DistinctDay { day: NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(), max_late_minutes: 0 }];

        let result = compute(&input(from, to), &settings(), &one_day, &[], &[]);
        assert_eq!(result.present_days_in_range, 1);
    }

    /// S7 from spec §8: 30 raw late minutes minus a 20-minute approved delay
    /// permission nets to 10 minutes deducted.
    #[test]
    fn s7_delay_permission_offsets_lateness() {
        let from = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        let to = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        let day = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        let days = vec![DistinctDay { day, max_late_minutes: 30 }];
        let permission = ApprovedDelayPermission {
            id: crate::common::entity_ids::ApprovedDelayPermissionId::new(),
            company_id: CompanyId::new(),
            employee_id: EmployeeId::new(),
            day,
            minutes: 20,
        };

        let result = compute(&input(from, to), &settings(), &days, &[], &[permission]);
        assert_eq!(result.lateness_minutes_deducted, 10);
    }

    #[test]
    fn p6_absence_never_negative_when_leave_exceeds_range() {
        let from = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        let to = NaiveDate::from_ymd_opt(2026, 1, 3).unwrap();
        let leave = vec![
            ApprovedLeaveDay {
                id: crate::common::entity_ids::ApprovedLeaveDayId::new(),
                company_id: CompanyId::new(),
                employee_id: EmployeeId::new(),
                day: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
            },
            ApprovedLeaveDay {
                id: crate::common::entity_ids::ApprovedLeaveDayId::new(),
                company_id: CompanyId::new(),
                employee_id: EmployeeId::new(),
                day: NaiveDate::from_ymd_opt(2026, 1, 2).unwrap(),
            },
            ApprovedLeaveDay {
                id: crate::common::entity_ids::ApprovedLeaveDayId::new(),
                company_id: CompanyId::new(),
                employee_id: EmployeeId::new(),
                day: NaiveDate::from_ymd_opt(2026, 1, 3).unwrap(),
            },
        ];

        let result = compute(&input(from, to), &settings(), &[], &leave, &[]);
        assert_eq!(result.absence_days_in_range, 0);
    }
}
