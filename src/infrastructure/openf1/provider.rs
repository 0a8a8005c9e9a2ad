//! OpenF1-backed session provider

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use super::client::{OpenF1Client, PROVIDER};
use super::models::{CarDataRecord, DriverRecord, LapRecord, MeetingRecord, SessionRecord};
use crate::domain::telemetry::{CarData, CarDataSample};
use crate::domain::{
    DomainError, Driver, Lap, Laps, LoadOptions, LoadedSession, SessionDescriptor, SessionInfo,
    SessionProvider,
};

/// Resolves and loads sessions from the OpenF1 REST API
#[derive(Debug, Clone)]
pub struct OpenF1Provider {
    client: OpenF1Client,
}

impl OpenF1Provider {
    pub fn new(client: OpenF1Client) -> Self {
        Self { client }
    }

    async fn find_meeting(&self, year: i32, event: &str) -> Result<MeetingRecord, DomainError> {
        let url = self.client.url("meetings", &[("year=", year.to_string())]);
        let mut meetings: Vec<MeetingRecord> = self.client.get_list(&url).await?;

        if meetings.is_empty() {
            return Err(DomainError::provider(
                PROVIDER,
                format!("No events found for {}", year),
            ));
        }

        meetings.sort_by_key(|m| m.date_start);

        let found = match event.trim().parse::<usize>() {
            Ok(round) => meetings
                .into_iter()
                .filter(|m| !m.is_testing())
                .nth(round.wrapping_sub(1)),
            Err(_) => {
                let exact = meetings.iter().position(|m| m.matches_exactly(event));
                let index = exact.or_else(|| meetings.iter().position(|m| m.matches(event)));
                index.map(|i| meetings.swap_remove(i))
            }
        };

        found.ok_or_else(|| {
            DomainError::provider(
                PROVIDER,
                format!("Event '{}' not found in the {} schedule", event, year),
            )
        })
    }
}

#[async_trait]
impl SessionProvider for OpenF1Provider {
    fn name(&self) -> &'static str {
        PROVIDER
    }

    async fn get_session(
        &self,
        year: i32,
        event: &str,
        session_type: &str,
    ) -> Result<SessionDescriptor, DomainError> {
        let meeting = self.find_meeting(year, event).await?;

        let url = self
            .client
            .url("sessions", &[("meeting_key=", meeting.meeting_key.to_string())]);
        let sessions: Vec<SessionRecord> = self.client.get_list(&url).await?;

        let session = sessions
            .into_iter()
            .find(|s| s.matches(session_type))
            .ok_or_else(|| {
                DomainError::provider(
                    PROVIDER,
                    format!(
                        "Session '{}' not found for {}",
                        session_type,
                        meeting.name()
                    ),
                )
            })?;

        debug!(
            meeting_key = meeting.meeting_key,
            session_key = session.session_key,
            session_name = %session.session_name,
            "Resolved OpenF1 session"
        );

        let event_name = meeting
            .meeting_name
            .clone()
            .unwrap_or_else(|| event.to_string());
        let track_name = session
            .circuit_short_name
            .or(meeting.circuit_short_name)
            .or(session.location)
            .or(meeting.location)
            .unwrap_or_default();

        Ok(SessionDescriptor {
            id: session.session_key.to_string(),
            info: SessionInfo {
                year,
                event_name,
                session_type: session_type.to_string(),
                session_name: session.session_name,
                track_name,
                country: session.country_name.or(meeting.country_name),
                date_start: session.date_start,
            },
        })
    }

    async fn load_session(
        &self,
        descriptor: SessionDescriptor,
        options: LoadOptions,
    ) -> Result<Arc<dyn LoadedSession>, DomainError> {
        let key_filter = [("session_key=", descriptor.id.clone())];
        let drivers_url = self.client.url("drivers", &key_filter);
        let laps_url = self.client.url("laps", &key_filter);

        let (driver_records, lap_records) = tokio::try_join!(
            self.client.get_list::<DriverRecord>(&drivers_url),
            self.client.get_list::<LapRecord>(&laps_url)
        )?;

        let codes: HashMap<u32, String> = driver_records
            .iter()
            .map(|d| (d.driver_number, d.code().to_uppercase()))
            .collect();

        let laps: Laps = lap_records
            .into_iter()
            .map(|record| {
                let code = codes
                    .get(&record.driver_number)
                    .cloned()
                    .unwrap_or_else(|| record.driver_number.to_string());
                record.into_lap(code)
            })
            .collect();

        let drivers: Vec<Driver> = driver_records
            .into_iter()
            .map(DriverRecord::into_driver)
            .collect();

        info!(
            session_key = %descriptor.id,
            drivers = drivers.len(),
            laps = laps.len(),
            telemetry = options.telemetry,
            "Loaded OpenF1 session"
        );

        Ok(Arc::new(OpenF1Session {
            client: self.client.clone(),
            session_key: descriptor.id,
            info: descriptor.info,
            drivers,
            laps,
            telemetry: options.telemetry,
        }))
    }
}

/// A session loaded from OpenF1; car data is fetched per lap on demand
#[derive(Debug)]
pub struct OpenF1Session {
    client: OpenF1Client,
    session_key: String,
    info: SessionInfo,
    drivers: Vec<Driver>,
    laps: Laps,
    telemetry: bool,
}

/// Longest car-data window requested for a single lap
const MAX_LAP_WINDOW_SECS: i64 = 300;

impl OpenF1Session {
    /// Time window covered by `lap`. The end is the first known of: lap
    /// duration, sum of sector times, start of the driver's next lap. It is
    /// capped at `MAX_LAP_WINDOW_SECS` after the start, which also bounds
    /// final and abandoned laps.
    fn lap_window(&self, lap: &Lap) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        let start = lap.date_start()?;
        let limit = start + chrono::Duration::seconds(MAX_LAP_WINDOW_SECS);

        let end = lap
            .lap_time()
            .or_else(|| lap.sector_total())
            .and_then(|t| chrono::Duration::from_std(t).ok())
            .map(|t| start + t)
            .or_else(|| self.laps.next_lap(lap).and_then(Lap::date_start))
            .filter(|end| *end > start)
            .map_or(limit, |end| end.min(limit));

        Some((start, end))
    }
}

#[async_trait]
impl LoadedSession for OpenF1Session {
    fn info(&self) -> &SessionInfo {
        &self.info
    }

    fn drivers(&self) -> &[Driver] {
        &self.drivers
    }

    fn laps(&self) -> &Laps {
        &self.laps
    }

    fn telemetry_loaded(&self) -> bool {
        self.telemetry
    }

    async fn car_data(&self, lap: &Lap) -> Result<CarData, DomainError> {
        if !self.telemetry {
            return Err(DomainError::validation(
                "Telemetry was not loaded for this session",
            ));
        }

        let Some((start, end)) = self.lap_window(lap) else {
            warn!(
                driver = %lap.driver_code(),
                lap = lap.lap_number(),
                "Lap has no start time, no car data available"
            );
            return Ok(CarData::default());
        };

        let filters = [
            ("session_key=", self.session_key.clone()),
            ("driver_number=", lap.driver_number().to_string()),
            ("date>=", format_date(start)),
            ("date<", format_date(end)),
        ];

        let url = self.client.url("car_data", &filters);
        let records: Vec<CarDataRecord> = self.client.get_list(&url).await?;

        let mut samples: Vec<CarDataSample> = records.into_iter().map(Into::into).collect();
        samples.sort_by_key(|s| s.date);

        Ok(CarData::new(samples).add_distance())
    }
}

fn format_date(date: DateTime<Utc>) -> String {
    date.format("%Y-%m-%dT%H:%M:%S%.3f").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn mount(server: &MockServer, endpoint: &str, body: serde_json::Value) {
        Mock::given(method("GET"))
            .and(path(format!("/{}", endpoint)))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(server)
            .await;
    }

    async fn schedule(server: &MockServer) {
        mount(
            server,
            "meetings",
            serde_json::json!([
                {
                    "meeting_key": 1229,
                    "meeting_name": "Bahrain Grand Prix",
                    "location": "Sakhir",
                    "country_name": "Bahrain",
                    "circuit_short_name": "Sakhir",
                    "date_start": "2024-02-29T11:30:00+00:00"
                },
                {
                    "meeting_key": 1228,
                    "meeting_name": "Pre-Season Testing",
                    "location": "Sakhir",
                    "country_name": "Bahrain",
                    "circuit_short_name": "Sakhir",
                    "date_start": "2024-02-21T07:00:00+00:00"
                },
                {
                    "meeting_key": 1236,
                    "meeting_name": "Monaco Grand Prix",
                    "meeting_official_name": "FORMULA 1 GRAND PRIX DE MONACO 2024",
                    "location": "Monaco",
                    "country_name": "Monaco",
                    "circuit_short_name": "Monte Carlo",
                    "date_start": "2024-05-24T11:30:00+00:00"
                }
            ]),
        )
        .await;

        mount(
            server,
            "sessions",
            serde_json::json!([
                {"session_key": 9521, "session_name": "Practice 1", "session_type": "Practice"},
                {
                    "session_key": 9523,
                    "session_name": "Qualifying",
                    "session_type": "Qualifying",
                    "country_name": "Monaco",
                    "circuit_short_name": "Monte Carlo",
                    "date_start": "2024-05-25T14:00:00+00:00"
                },
                {"session_key": 9524, "session_name": "Race", "session_type": "Race"}
            ]),
        )
        .await;
    }

    fn provider(server: &MockServer) -> OpenF1Provider {
        OpenF1Provider::new(OpenF1Client::new(server.uri(), Duration::from_secs(5)).unwrap())
    }

    #[tokio::test]
    async fn test_get_session_by_name() {
        let server = MockServer::start().await;
        schedule(&server).await;

        let descriptor = provider(&server)
            .get_session(2024, "monaco", "Q")
            .await
            .unwrap();

        assert_eq!(descriptor.id, "9523");
        assert_eq!(descriptor.info.event_name, "Monaco Grand Prix");
        assert_eq!(descriptor.info.session_type, "Q");
        assert_eq!(descriptor.info.session_name, "Qualifying");
        assert_eq!(descriptor.info.track_name, "Monte Carlo");
        assert_eq!(descriptor.info.country.as_deref(), Some("Monaco"));
    }

    #[tokio::test]
    async fn test_get_session_by_round_skips_testing() {
        let server = MockServer::start().await;
        schedule(&server).await;

        let descriptor = provider(&server)
            .get_session(2024, "1", "FP1")
            .await
            .unwrap();

        assert_eq!(descriptor.info.event_name, "Bahrain Grand Prix");
        assert_eq!(descriptor.id, "9521");
    }

    #[tokio::test]
    async fn test_unknown_event_is_provider_error() {
        let server = MockServer::start().await;
        schedule(&server).await;

        let err = provider(&server)
            .get_session(2024, "Atlantis", "Q")
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::Provider { .. }));
        assert!(!err.is_client_error());
    }

    #[tokio::test]
    async fn test_unknown_session_type_is_provider_error() {
        let server = MockServer::start().await;
        schedule(&server).await;

        let err = provider(&server)
            .get_session(2024, "Monaco", "SQ")
            .await
            .unwrap_err();

        assert!(err.to_string().contains("Session 'SQ' not found"));
    }

    async fn loaded(server: &MockServer, telemetry: bool) -> Arc<dyn LoadedSession> {
        loaded_with_laps(
            server,
            telemetry,
            serde_json::json!([
                {
                    "driver_number": 4,
                    "lap_number": 1,
                    "lap_duration": null,
                    "date_start": null,
                    "is_pit_out_lap": true
                },
                {
                    "driver_number": 4,
                    "lap_number": 2,
                    "lap_duration": 70.27,
                    "duration_sector_1": 18.6,
                    "duration_sector_2": 32.4,
                    "duration_sector_3": 19.27,
                    "date_start": "2024-05-25T14:20:00+00:00"
                },
                {
                    "driver_number": 16,
                    "lap_number": 1,
                    "lap_duration": 70.5,
                    "date_start": "2024-05-25T14:21:00+00:00"
                }
            ]),
        )
        .await
    }

    async fn loaded_with_laps(
        server: &MockServer,
        telemetry: bool,
        laps: serde_json::Value,
    ) -> Arc<dyn LoadedSession> {
        mount(
            server,
            "drivers",
            serde_json::json!([
                {
                    "driver_number": 4,
                    "name_acronym": "NOR",
                    "full_name": "Lando NORRIS",
                    "team_name": "McLaren",
                    "team_colour": "FF8000"
                },
                {"driver_number": 16, "name_acronym": "LEC", "team_name": "Ferrari"}
            ]),
        )
        .await;
        mount(server, "laps", laps).await;

        let descriptor = SessionDescriptor {
            id: "9523".to_string(),
            info: crate::domain::session::mock::session_info(2024, "Monaco", "Q"),
        };

        provider(server)
            .load_session(descriptor, LoadOptions::with_telemetry(telemetry))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_load_session_maps_drivers_and_laps() {
        let server = MockServer::start().await;
        let session = loaded(&server, true).await;

        assert_eq!(session.driver_codes(), vec!["NOR", "LEC"]);
        assert_eq!(session.driver("nor").unwrap().full_name(), Some("Lando NORRIS"));
        assert!(session.driver("LEC").unwrap().full_name().is_none());
        assert_eq!(session.laps().len(), 3);

        let fastest = session.laps().pick_fastest().unwrap();
        assert_eq!(fastest.driver_code(), "NOR");
        assert_eq!(fastest.lap_number(), 2);
        assert!(session.telemetry_loaded());
    }

    #[tokio::test]
    async fn test_car_data_integrates_distance() {
        let server = MockServer::start().await;
        let session = loaded(&server, true).await;

        Mock::given(method("GET"))
            .and(path("/car_data"))
            .and(query_param("driver_number", "4"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {"date": "2024-05-25T14:20:01+00:00", "speed": 360, "throttle": 100, "brake": 0, "rpm": 11000, "n_gear": 7, "drs": 0},
                {"date": "2024-05-25T14:20:00+00:00", "speed": 360, "throttle": 100, "brake": 0, "rpm": 11000, "n_gear": 7, "drs": 0},
                {"date": "2024-05-25T14:20:02+00:00", "speed": null, "throttle": 90, "brake": 0, "rpm": 10500, "n_gear": 7, "drs": 0}
            ])))
            .mount(&server)
            .await;

        let lap = session.laps().pick_driver_lap("NOR", 2).unwrap().clone();
        let data = session.car_data(&lap).await.unwrap();

        assert_eq!(
            car_data_upper_bound(&server).await.as_deref(),
            Some("2024-05-25T14:21:10.270")
        );
        assert_eq!(data.len(), 3);
        assert_eq!(data.get(0).unwrap().distance, Some(0.0));
        assert!((data.get(1).unwrap().distance.unwrap() - 100.0).abs() < 1e-9);
        assert_eq!(data.get(2).unwrap().distance, None);
    }

    #[tokio::test]
    async fn test_car_data_requires_telemetry() {
        let server = MockServer::start().await;
        let session = loaded(&server, false).await;

        let lap = session.laps().pick_driver_lap("NOR", 2).unwrap().clone();
        let err = session.car_data(&lap).await.unwrap_err();

        assert!(matches!(err, DomainError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_car_data_for_lap_without_start_is_empty() {
        let server = MockServer::start().await;
        let session = loaded(&server, true).await;

        let lap = session.laps().pick_driver_lap("NOR", 1).unwrap().clone();
        let data = session.car_data(&lap).await.unwrap();

        assert!(data.is_empty());
    }

    /// The `date<` filter of the last car data request
    async fn car_data_upper_bound(server: &MockServer) -> Option<String> {
        server
            .received_requests()
            .await?
            .into_iter()
            .filter(|request| request.url.path() == "/car_data")
            .flat_map(|request| {
                request
                    .url
                    .query_pairs()
                    .map(|(key, _)| key.into_owned())
                    .collect::<Vec<_>>()
            })
            .filter_map(|key| key.strip_prefix("date<").map(str::to_string))
            .last()
    }

    fn final_lap(extra: serde_json::Value) -> serde_json::Value {
        let mut lap = serde_json::json!({
            "driver_number": 4,
            "lap_number": 57,
            "lap_duration": null,
            "date_start": "2024-05-26T15:40:00+00:00"
        });
        if let (Some(lap), Some(extra)) = (lap.as_object_mut(), extra.as_object()) {
            lap.extend(extra.clone());
        }
        serde_json::json!([lap])
    }

    #[tokio::test]
    async fn test_final_lap_without_duration_is_capped() {
        let server = MockServer::start().await;
        let session = loaded_with_laps(&server, true, final_lap(serde_json::json!({}))).await;
        mount(&server, "car_data", serde_json::json!([])).await;

        let lap = session.laps().pick_driver_lap("NOR", 57).unwrap().clone();
        session.car_data(&lap).await.unwrap();

        assert_eq!(
            car_data_upper_bound(&server).await.as_deref(),
            Some("2024-05-26T15:45:00.000")
        );
    }

    #[tokio::test]
    async fn test_lap_window_falls_back_to_sector_times() {
        let server = MockServer::start().await;
        let laps = final_lap(serde_json::json!({
            "duration_sector_1": 20.0,
            "duration_sector_2": 30.0,
            "duration_sector_3": 25.5
        }));
        let session = loaded_with_laps(&server, true, laps).await;
        mount(&server, "car_data", serde_json::json!([])).await;

        let lap = session.laps().pick_driver_lap("NOR", 57).unwrap().clone();
        session.car_data(&lap).await.unwrap();

        assert_eq!(
            car_data_upper_bound(&server).await.as_deref(),
            Some("2024-05-26T15:41:15.500")
        );
    }
}
