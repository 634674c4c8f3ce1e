use anyhow::{Context, Result};
use log::info;
use regex::Regex;

use crate::config::settings::AppConfig;
use crate::database::models::Player;
use crate::database::{self, DbPool};
use crate::domain::models::{sanitize_text, Level, Registration};
use crate::errors::{LadderError, ValidationError};
use crate::rating::GlickoRating;

/// Registers new players and assigns them the bottom ladder rank.
pub struct RegistrationService {
    pool: DbPool,
    config: AppConfig,
    phone_regex: Regex,
}

impl RegistrationService {
    pub fn new(pool: DbPool, config: AppConfig) -> Result<Self> {
        Ok(Self {
            pool,
            config,
            phone_regex: Self::compile_phone_regex()?,
        })
    }

    fn compile_phone_regex() -> Result<Regex> {
        Regex::new(r"^[0-9+\-\s()]+$").context("Failed to compile phone number pattern")
    }

    pub fn register(&self, registration: &Registration) -> Result<Player, LadderError> {
        let name = sanitize_text(&registration.name, self.config.ladder.max_name_len);
        if name.is_empty() {
            return Err(ValidationError::MissingName.into());
        }

        let level = Level::parse(&registration.level)?;
        let phone = self.validate_phone(registration.phone.as_deref())?;

        let mut conn = database::get_connection(&self.pool)?;
        let player = database::with_immediate_tx(&mut conn, |tx| {
            if database::players::find_by_name(tx, &name)?.is_some() {
                return Err(ValidationError::DuplicateName(name.clone()).into());
            }

            let rank = database::players::next_rank(tx)?;
            let player = database::players::insert_player(
                tx,
                &name,
                phone.as_deref(),
                registration.phone_consent,
                level.as_str(),
                rank,
                GlickoRating::starter(&self.config.rating),
            )?;
            Ok(player)
        })?;

        info!(
            "Registered player '{}' at rank {} (level {})",
            player.name, player.ladder_rank, player.level
        );
        Ok(player)
    }

    fn validate_phone(&self, phone: Option<&str>) -> Result<Option<String>, ValidationError> {
        let Some(raw) = phone else {
            return Ok(None);
        };

        let cleaned = sanitize_text(raw, self.config.ladder.max_phone_len);
        if cleaned.is_empty() {
            return Ok(None);
        }
        if !self.phone_regex.is_match(&cleaned) {
            return Err(ValidationError::InvalidPhone);
        }
        Ok(Some(cleaned))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::connection::create_test_pool;
    use crate::database::setup::reset_database;

    fn service() -> RegistrationService {
        let pool = create_test_pool();
        reset_database(&pool.get().unwrap()).unwrap();
        RegistrationService::new(pool, AppConfig::new()).unwrap()
    }

    fn registration(name: &str) -> Registration {
        Registration {
            name: name.to_string(),
            phone: None,
            phone_consent: false,
            level: "3.5".to_string(),
        }
    }

    #[test]
    fn first_player_gets_rank_one_then_ranks_count_up() {
        let service = service();

        let ana = service.register(&registration("Ana")).unwrap();
        let beto = service.register(&registration("Beto")).unwrap();

        assert_eq!(ana.ladder_rank, 1);
        assert_eq!(beto.ladder_rank, 2);
        assert_eq!(ana.rating, 1500.0);
        assert_eq!(ana.rating_deviation, 350.0);
        assert_eq!(ana.volatility, 0.06);
    }

    #[test]
    fn duplicate_name_is_rejected() {
        let service = service();
        service.register(&registration("Ana")).unwrap();

        let err = service.register(&registration("  Ana ")).unwrap_err();
        assert!(matches!(
            err,
            LadderError::Validation(ValidationError::DuplicateName(_))
        ));
    }

    #[test]
    fn empty_name_is_rejected() {
        let service = service();
        let err = service.register(&registration("   ")).unwrap_err();
        assert!(matches!(
            err,
            LadderError::Validation(ValidationError::MissingName)
        ));
    }

    #[test]
    fn bad_phone_characters_are_rejected() {
        let service = service();
        let mut reg = registration("Ana");
        reg.phone = Some("910-555-01x2".to_string());

        let err = service.register(&reg).unwrap_err();
        assert!(matches!(
            err,
            LadderError::Validation(ValidationError::InvalidPhone)
        ));
    }

    #[test]
    fn valid_phone_and_consent_are_stored() {
        let service = service();
        let mut reg = registration("Ana");
        reg.phone = Some(" (910) 555-0123 ".to_string());
        reg.phone_consent = true;

        let player = service.register(&reg).unwrap();
        assert_eq!(player.phone.as_deref(), Some("(910) 555-0123"));
        assert!(player.phone_consent);
    }

    #[test]
    fn unknown_level_is_rejected() {
        let service = service();
        let mut reg = registration("Ana");
        reg.level = "6.0".to_string();

        let err = service.register(&reg).unwrap_err();
        assert!(matches!(
            err,
            LadderError::Validation(ValidationError::UnknownLevel(_))
        ));
    }
}
