use chrono::{DateTime, Utc};

use auditdesk_core::{AppError, AppResult};

/// Returns `<kind>-<epochMillis>`, suffixed with `-<n>` until unused.
pub(crate) fn next_identifier(
    kind: &str,
    now: DateTime<Utc>,
    is_taken: impl Fn(&str) -> bool,
) -> String {
    let base = format!("{kind}-{}", now.timestamp_millis());
    if !is_taken(&base) {
        return base;
    }

    let mut suffix = 1_u32;
    loop {
        let candidate = format!("{base}-{suffix}");
        if !is_taken(&candidate) {
            return candidate;
        }
        suffix = suffix.saturating_add(1);
    }
}

/// Returns `audit-<epochMillis>-<random fraction>`.
///
/// Several audits are usually written within the same millisecond when a
/// whole website is submitted at once.
pub(crate) fn audit_identifier(
    now: DateTime<Utc>,
    is_taken: impl Fn(&str) -> bool,
) -> AppResult<String> {
    loop {
        let candidate = format!("audit-{}-{}", now.timestamp_millis(), random_fraction()?);
        if !is_taken(&candidate) {
            return Ok(candidate);
        }
    }
}

fn random_fraction() -> AppResult<f64> {
    let mut bytes = [0_u8; 8];
    getrandom::fill(&mut bytes)
        .map_err(|error| AppError::Internal(format!("failed to gather randomness: {error}")))?;

    // 53 random bits map exactly onto the f64 mantissa.
    let bits = u64::from_le_bytes(bytes) >> 11;
    #[allow(clippy::cast_precision_loss)]
    let fraction = bits as f64 / (1_u64 << 53) as f64;
    Ok(fraction)
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::{audit_identifier, next_identifier};

    #[test]
    fn identifier_uses_kind_and_millis() {
        let now = Utc.timestamp_millis_opt(1_760_000_000_123).single().unwrap_or_default();
        assert_eq!(next_identifier("website", now, |_| false), "website-1760000000123");
    }

    #[test]
    fn taken_identifier_gets_suffix() {
        let now = Utc.timestamp_millis_opt(42).single().unwrap_or_default();
        let taken = ["module-42", "module-42-1"];

        let identifier = next_identifier("module", now, |candidate| taken.contains(&candidate));
        assert_eq!(identifier, "module-42-2");
    }

    #[test]
    fn audit_identifiers_differ_within_one_millisecond() {
        let now = Utc::now();
        let first = audit_identifier(now, |_| false).unwrap_or_default();
        let second = audit_identifier(now, |candidate| candidate == first).unwrap_or_default();

        assert!(first.starts_with(&format!("audit-{}-0.", now.timestamp_millis())));
        assert_ne!(first, second);
    }
}
