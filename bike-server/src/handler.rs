//! Normalized turn handling.
//!
//! One inbound conversational turn in, one response out. The handler
//! owns the orchestration the dialogue machine deliberately avoids:
//! loading the stored address, geocoding, locale gating, ranking
//! against the session's cached feed, and persisting the finalized
//! address atomically.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::config::SkillConfig;
use crate::dialogue::{AcquisitionEvent, InputMode, StepEffect, prompts};
use crate::domain::{Address, SystemId};
use crate::geocode::GeocodeProvider;
use crate::locale::LocaleTable;
use crate::ranking::rank;
use crate::select::select;
use crate::session::{Session, SessionStore};
use crate::speech;
use crate::storage::AddressStore;

/// Slot values carried by a turn event.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TurnSlots {
    #[serde(rename = "HouseNumber")]
    pub house_number: Option<String>,
    #[serde(rename = "StreetName")]
    pub street_name: Option<String>,
    #[serde(rename = "Zipcode")]
    pub zipcode: Option<String>,
    #[serde(rename = "Address")]
    pub address: Option<String>,
}

/// One normalized inbound turn.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TurnEvent {
    pub intent_name: String,
    #[serde(default)]
    pub slots: TurnSlots,
    pub session_id: String,
    pub user_id: String,
    /// Opaque platform attributes; session state lives server-side.
    #[serde(default)]
    pub session_attributes: serde_json::Map<String, serde_json::Value>,
}

/// One normalized outbound response.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TurnResponse {
    /// Plain text or speech markup.
    pub speech_text: String,
    /// True keeps the dialogue open awaiting another turn.
    pub continues_session: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reprompt_text: Option<String>,
}

impl TurnResponse {
    /// Keep the session open, awaiting another turn.
    pub fn ask(speech: impl Into<String>, reprompt: impl Into<String>) -> Self {
        Self {
            speech_text: speech.into(),
            continues_session: true,
            reprompt_text: Some(reprompt.into()),
        }
    }

    /// End the dialogue.
    pub fn tell(speech: impl Into<String>) -> Self {
        Self {
            speech_text: speech.into(),
            continues_session: false,
            reprompt_text: None,
        }
    }
}

/// The turn handler: all collaborators behind one entry point.
pub struct TurnHandler {
    store: Arc<dyn AddressStore>,
    geocoder: GeocodeProvider,
    locales: LocaleTable,
    sessions: SessionStore,
    system: SystemId,
    config: SkillConfig,
}

impl TurnHandler {
    pub fn new(
        store: Arc<dyn AddressStore>,
        geocoder: GeocodeProvider,
        locales: LocaleTable,
        sessions: SessionStore,
        system: SystemId,
        config: SkillConfig,
    ) -> Self {
        Self {
            store,
            geocoder,
            locales,
            sessions,
            system,
            config,
        }
    }

    /// Handle one turn. Errors never escape: every failure becomes a
    /// spoken response.
    pub async fn handle(&self, event: TurnEvent) -> TurnResponse {
        tracing::info!(
            intent = %event.intent_name,
            session = %event.session_id,
            "handling turn"
        );

        match event.intent_name.as_str() {
            "LaunchRequest" => self.on_launch(&event),
            "FindBikeIntent" => self.on_find_bike(&event).await,
            "AddAddressIntent" => {
                let freeform = match self.config.input_mode {
                    InputMode::Freeform => event.slots.address.clone(),
                    InputMode::Structured => None,
                };
                self.on_dialogue_event(&event, AcquisitionEvent::Start { freeform })
                    .await
            }
            "HouseNumberIntent" => match event.slots.house_number.clone() {
                Some(n) => {
                    self.on_dialogue_event(&event, AcquisitionEvent::HouseNumber(n))
                        .await
                }
                None => Self::missing_slot("house number"),
            },
            "StreetNameIntent" => match event.slots.street_name.clone() {
                Some(s) => {
                    self.on_dialogue_event(&event, AcquisitionEvent::StreetName(s))
                        .await
                }
                None => Self::missing_slot("street name"),
            },
            "ZipcodeIntent" => match event.slots.zipcode.clone() {
                Some(z) => {
                    self.on_dialogue_event(&event, AcquisitionEvent::Zipcode(z))
                        .await
                }
                None => Self::missing_slot("zipcode"),
            },
            "OverwriteAddressIntent" => {
                self.on_dialogue_event(&event, AcquisitionEvent::OverwriteConfirmed)
                    .await
            }
            "KeepAddressIntent" => {
                self.on_dialogue_event(&event, AcquisitionEvent::OverwriteDeclined)
                    .await
            }
            "AMAZON.HelpIntent" => TurnResponse::ask(
                "You can ask me, find me a bike, and I'll tell you the closest \
                 station with bikes available. Or say, add address, to set your home address.",
                "Say, find me a bike, or, add address.",
            ),
            "SessionEndedRequest" => {
                self.sessions.end(&event.session_id).await;
                TurnResponse::tell("Goodbye.")
            }
            other => {
                tracing::debug!(intent = %other, "unrecognized intent");
                TurnResponse::ask(
                    "Sorry, I didn't understand that. You can say, find me a bike, \
                     or, add address.",
                    "Say, find me a bike, or, add address.",
                )
            }
        }
    }

    fn missing_slot(field: &str) -> TurnResponse {
        TurnResponse::ask(
            format!("Sorry, I didn't catch your {field}. Could you repeat it?"),
            format!("Please tell me your {field}."),
        )
    }

    fn on_launch(&self, event: &TurnEvent) -> TurnResponse {
        match self.load_address(&event.user_id) {
            Ok(Some(_)) => TurnResponse::ask(
                "Welcome to the bike finder. I have your address on file. \
                 You can ask me, find me a bike.",
                "Since I have your address on file, you can ask me, find me a bike, \
                 and I'll give you the closest station to you with bikes available.",
            ),
            Ok(None) => TurnResponse::ask(
                "Welcome to the bike finder. There is currently no address set for \
                 your home. You can add one by asking me to add an address.",
                "Before you find any bikes, you first need to add an address. \
                 Say, add address, to begin.",
            ),
            Err(response) => response,
        }
    }

    async fn on_find_bike(&self, event: &TurnEvent) -> TurnResponse {
        let stored = match self.load_address(&event.user_id) {
            Ok(stored) => stored,
            Err(response) => return response,
        };

        let Some(address) = stored else {
            return TurnResponse::tell(prompts::NO_ADDRESS_SET);
        };

        let session = self.sessions.get_or_create(&event.session_id).await;

        let snapshot = match session.feed.get().await {
            Ok(snapshot) => snapshot,
            Err(_) => return TurnResponse::tell(prompts::FEED_UNAVAILABLE),
        };

        let selection = select(
            &address.closest_stations,
            &snapshot,
            &self.config.selection,
        );

        TurnResponse::tell(speech::render_selection(&selection))
    }

    async fn on_dialogue_event(
        &self,
        event: &TurnEvent,
        acq_event: AcquisitionEvent,
    ) -> TurnResponse {
        let stored = match self.load_address(&event.user_id) {
            Ok(stored) => stored,
            Err(response) => return response,
        };
        let overwriting = stored.is_some();

        let session = self.sessions.get_or_create(&event.session_id).await;

        let effect = session
            .dialogue
            .lock()
            .await
            .step(acq_event, overwriting);

        match effect {
            StepEffect::Prompt(kind) => {
                let (prompt, reprompt) = prompts::texts(kind);
                TurnResponse::ask(prompt, reprompt)
            }
            StepEffect::KeptExisting => TurnResponse::tell(prompts::KEPT_EXISTING),
            StepEffect::Resolve { query } => {
                self.resolve(&session, event, &query, overwriting).await
            }
        }
    }

    /// Drive the RESOLVING phase: geocode, gate by locale, rank against
    /// the session feed, persist atomically, and report the outcome
    /// back to the machine.
    async fn resolve(
        &self,
        session: &Arc<Session>,
        event: &TurnEvent,
        query: &str,
        overwriting: bool,
    ) -> TurnResponse {
        let geocoded = match self.geocoder.geocode(query).await {
            Ok(Some(geocoded)) => geocoded,
            Ok(None) => {
                tracing::debug!(query, "geocoder found no match");
                return self.retry_prompt(session).await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "geocoding failed");
                return self.retry_prompt(session).await;
            }
        };

        let locale_supported = geocoded
            .administrative_locale
            .as_deref()
            .is_some_and(|locale| self.locales.is_supported(&self.system, locale));

        if !locale_supported {
            session.dialogue.lock().await.resolution_rejected();
            return TurnResponse::tell(prompts::UNSUPPORTED_REGION);
        }

        // Stations must be ranked before anything is persisted: the
        // record is replaced whole or not at all.
        let snapshot = match session.feed.get().await {
            Ok(snapshot) => snapshot,
            Err(_) => {
                session.dialogue.lock().await.resolution_aborted();
                return TurnResponse::tell(prompts::FEED_UNAVAILABLE);
            }
        };

        let origin = crate::domain::Coordinate::new(geocoded.latitude, geocoded.longitude);
        let closest_stations = rank(snapshot.records(), origin, self.config.closest_stations_k);

        let address = {
            let dialogue = session.dialogue.lock().await;
            Address {
                house_number: dialogue.house_number().cloned(),
                street_name: dialogue.street_name().cloned(),
                zipcode: dialogue.zipcode().cloned(),
                formatted_address: geocoded.formatted_address.clone(),
                latitude: geocoded.latitude,
                longitude: geocoded.longitude,
                closest_stations,
                system: self.system.clone(),
            }
        };

        if let Err(e) = self.store.save(&event.user_id, &address) {
            tracing::error!(error = %e, user = %event.user_id, "address save failed");
            session.dialogue.lock().await.resolution_aborted();
            return TurnResponse::tell(prompts::SAVE_FAILED);
        }

        session.dialogue.lock().await.resolution_succeeded();

        let save_word = if overwriting { "overwritten" } else { "saved" };
        TurnResponse::tell(speech::speak(&format!(
            "Your address has been {save_word} as {}. You can now ask, \
             find me the closest bike.",
            speech::say_address(&address.formatted_address)
        )))
    }

    async fn retry_prompt(&self, session: &Arc<Session>) -> TurnResponse {
        let kind = session.dialogue.lock().await.resolution_failed_retry();
        let (prompt, reprompt) = prompts::texts(kind);
        TurnResponse::ask(format!("{} {prompt}", prompts::GEOCODE_RETRY), reprompt)
    }

    fn load_address(&self, user_id: &str) -> Result<Option<Address>, TurnResponse> {
        self.store.load(user_id).map_err(|e| {
            tracing::error!(error = %e, user = %user_id, "address load failed");
            TurnResponse::tell(
                "Sorry, I'm having trouble reading your saved address. \
                 Please try again later.",
            )
        })
    }
}
