//! Helpers for running configuration loaders inside a `figment::Jail`.
//!
//! A jail gives each test a scratch working directory and a private copy of
//! the process environment, so `ORTHO_MESSAGES_*` overrides and config files
//! never leak between tests.

use anyhow::{Result, anyhow};

/// Executes `f` inside a [`figment::Jail`], returning the closure's output.
///
/// The jail is torn down once the closure completes, even when it fails.
///
/// # Errors
///
/// Returns an error if the jail cannot be created or the closure returns a
/// [`figment::Error`].
pub fn with_jail<F, T>(f: F) -> Result<T>
where
    F: FnOnce(&mut figment::Jail) -> figment::error::Result<T>,
{
    let mut output = None;
    figment::Jail::try_with(|jail| {
        output = Some(f(jail)?);
        Ok(())
    })
    .map_err(|err| anyhow!(err.to_string()))?;
    output.ok_or_else(|| anyhow!("jail closure did not return a value"))
}

/// Converts a loader error into a [`figment::Error`] so it can cross the jail
/// boundary with `?`.
#[must_use]
pub fn jail_error<E: ToString + ?Sized>(err: &E) -> figment::Error {
    figment::Error::from(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::{jail_error, with_jail};

    #[test]
    fn returns_closure_output() -> anyhow::Result<()> {
        let found = with_jail(|jail| {
            jail.set_env("ORTHO_MESSAGES_PROBE", "1");
            Ok(std::env::var("ORTHO_MESSAGES_PROBE").is_ok())
        })?;
        assert!(found);
        assert!(std::env::var("ORTHO_MESSAGES_PROBE").is_err());
        Ok(())
    }

    #[test]
    fn surfaces_closure_errors() {
        let outcome: anyhow::Result<()> = with_jail(|_| Err(jail_error("boom")));
        assert!(outcome.is_err_and(|err| err.to_string().contains("boom")));
    }
}
