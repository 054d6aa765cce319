// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Integration tests for the HTTP transport and sound mode handling using
//! wiremock.

use avr_soundmode::protocol::HttpClient;
use avr_soundmode::types::{AppCommand, CacheId, ReceiverType, SoundModeSupport};
use avr_soundmode::{
    ALL_ZONE_STEREO, Device, DeviceError, Error, ModeMap, ParseError, ProtocolError,
    ReceiverConfig,
};
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const STATUS_PAGE: &str = "/goform/formMainZone_MainZoneXmlStatus.xml";
const MAINZONE_PAGE: &str = "/goform/formMainZone_MainZoneXml.xml";
const APPCOMMAND: &str = "/goform/AppCommand.xml";
const COMMAND: &str = "/goform/formiPhoneAppDirect.xml";

fn host(mock_server: &MockServer) -> String {
    mock_server.uri().replace("http://", "")
}

fn legacy_device(mock_server: &MockServer) -> Device<HttpClient> {
    Device::http(host(mock_server)).build().unwrap()
}

fn modern_device(mock_server: &MockServer) -> Device<HttpClient> {
    Device::http(host(mock_server))
        .with_receiver_type(ReceiverType::AvrX2016)
        .build()
        .unwrap()
}

fn status_page(inner: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="utf-8" ?>
<item>
  <FriendlyName><value>Living Room</value></FriendlyName>
  <Power><value>ON</value></Power>
  {inner}
</item>"#
    )
}

fn appcommand_response(surround: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="utf-8" ?>
<rx>
  <cmd><surround>{surround}</surround></cmd>
</rx>"#
    )
}

async fn mount_page(mock_server: &MockServer, page: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(page))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(mock_server)
        .await;
}

async fn mount_appcommand(mock_server: &MockServer, surround: &str) {
    Mock::given(method("POST"))
        .and(path(APPCOMMAND))
        .and(body_string_contains("GetSurroundModeStatus"))
        .respond_with(ResponseTemplate::new(200).set_body_string(appcommand_response(surround)))
        .mount(mock_server)
        .await;
}

async fn mount_command(mock_server: &MockServer) {
    Mock::given(method("GET"))
        .and(path(COMMAND))
        .respond_with(ResponseTemplate::new(200))
        .mount(mock_server)
        .await;
}

async fn command_queries(mock_server: &MockServer) -> Vec<String> {
    mock_server
        .received_requests()
        .await
        .unwrap()
        .into_iter()
        .filter(|request| request.url.path() == COMMAND)
        .filter_map(|request| request.url.query().map(str::to_owned))
        .collect()
}

// ============================================================================
// Legacy status pages
// ============================================================================

mod legacy_status {
    use super::*;

    #[tokio::test]
    async fn reads_select_surround_from_status_page() {
        let mock_server = MockServer::start().await;
        mount_page(
            &mock_server,
            STATUS_PAGE,
            status_page("<selectSurround><value>DOLBY PL2 C          </value></selectSurround>"),
        )
        .await;
        mount_page(&mock_server, MAINZONE_PAGE, status_page("")).await;

        let device = legacy_device(&mock_server);
        device.update().await.unwrap();

        let sound_mode = device.sound_mode();
        assert!(sound_mode.is_setup());
        assert_eq!(sound_mode.support_sound_mode(), SoundModeSupport::Supported);
        assert_eq!(sound_mode.sound_mode_raw().as_deref(), Some("DOLBY PL2 C"));
        assert_eq!(sound_mode.sound_mode().as_deref(), Some("MOVIE"));
    }

    #[tokio::test]
    async fn falls_back_to_surr_mode_on_mainzone_page() {
        let mock_server = MockServer::start().await;
        mount_page(&mock_server, STATUS_PAGE, status_page("")).await;
        mount_page(
            &mock_server,
            MAINZONE_PAGE,
            status_page("<SurrMode><value>MULTI CH STEREO</value></SurrMode>"),
        )
        .await;

        let device = legacy_device(&mock_server);
        device.update().await.unwrap();

        assert_eq!(
            device.sound_mode().support_sound_mode(),
            SoundModeSupport::Supported
        );
        assert_eq!(device.sound_mode().sound_mode().as_deref(), Some("MCH STEREO"));
    }

    #[tokio::test]
    async fn unavailable_status_page_is_skipped() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(STATUS_PAGE))
            .respond_with(ResponseTemplate::new(404))
            .mount(&mock_server)
            .await;
        mount_page(
            &mock_server,
            MAINZONE_PAGE,
            status_page("<selectSurround><value>STEREO</value></selectSurround>"),
        )
        .await;

        let device = legacy_device(&mock_server);
        device.update().await.unwrap();

        assert_eq!(device.sound_mode().sound_mode().as_deref(), Some("STEREO"));
    }

    #[tokio::test]
    async fn failing_status_pages_are_reported_and_retried() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .up_to_n_times(1)
            .mount(&mock_server)
            .await;

        let device = legacy_device(&mock_server);
        let result = device.sound_mode().update_sound_mode(false, None).await;

        assert!(matches!(
            result,
            Err(Error::Protocol(ProtocolError::HttpStatus(503)))
        ));
        assert_eq!(
            device.sound_mode().support_sound_mode(),
            SoundModeSupport::Unknown
        );

        mount_page(
            &mock_server,
            STATUS_PAGE,
            status_page("<selectSurround><value>STEREO</value></selectSurround>"),
        )
        .await;
        mount_page(&mock_server, MAINZONE_PAGE, status_page("")).await;

        device.sound_mode().update_sound_mode(false, None).await.unwrap();

        assert_eq!(
            device.sound_mode().support_sound_mode(),
            SoundModeSupport::Supported
        );
        assert_eq!(device.sound_mode().sound_mode().as_deref(), Some("STEREO"));
    }

    #[tokio::test]
    async fn blank_sound_mode_value_is_not_a_mode() {
        let mock_server = MockServer::start().await;
        mount_page(
            &mock_server,
            STATUS_PAGE,
            status_page("<selectSurround><value>          </value></selectSurround>"),
        )
        .await;
        mount_page(&mock_server, MAINZONE_PAGE, status_page("")).await;

        let device = legacy_device(&mock_server);
        device.update().await.unwrap();

        let sound_mode = device.sound_mode();
        assert_eq!(sound_mode.sound_mode_raw(), None);
        assert_eq!(sound_mode.sound_mode(), None);
        assert!(!sound_mode.sound_mode_list().iter().any(String::is_empty));
    }

    #[tokio::test]
    async fn receiver_without_sound_mode_is_probed_once() {
        let mock_server = MockServer::start().await;
        // Setup probes both schemas on both pages
        Mock::given(method("GET"))
            .and(path(STATUS_PAGE))
            .respond_with(ResponseTemplate::new(200).set_body_string(status_page("")))
            .expect(2)
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path(MAINZONE_PAGE))
            .respond_with(ResponseTemplate::new(200).set_body_string(status_page("")))
            .expect(2)
            .mount(&mock_server)
            .await;

        let device = legacy_device(&mock_server);
        device.update().await.unwrap();
        device.update().await.unwrap();

        let sound_mode = device.sound_mode();
        assert_eq!(
            sound_mode.support_sound_mode(),
            SoundModeSupport::Unsupported
        );
        assert_eq!(sound_mode.support_sound_mode().as_option(), Some(false));
        assert_eq!(sound_mode.sound_mode(), None);
        assert_eq!(sound_mode.sound_mode_raw(), None);
    }

    #[tokio::test]
    async fn same_cache_id_fetches_each_page_once() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(STATUS_PAGE))
            .respond_with(ResponseTemplate::new(200).set_body_string(status_page(
                "<SurrMode><value>STEREO</value></SurrMode>",
            )))
            .expect(1)
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path(MAINZONE_PAGE))
            .respond_with(ResponseTemplate::new(200).set_body_string(status_page("")))
            .expect(1)
            .mount(&mock_server)
            .await;

        let device = legacy_device(&mock_server);
        let cache_id = CacheId::new();
        device
            .sound_mode()
            .update_sound_mode(false, Some(&cache_id))
            .await
            .unwrap();
        device
            .sound_mode()
            .update_sound_mode(false, Some(&cache_id))
            .await
            .unwrap();

        assert_eq!(device.sound_mode().sound_mode().as_deref(), Some("STEREO"));
    }

    #[tokio::test]
    async fn malformed_status_page_is_an_error() {
        let mock_server = MockServer::start().await;
        mount_page(&mock_server, STATUS_PAGE, "<item><value>".to_string()).await;

        let device = legacy_device(&mock_server);
        let result = device.sound_mode().update_sound_mode(false, None).await;

        assert!(matches!(result, Err(Error::Parse(ParseError::Xml(_)))));
        assert_eq!(
            device.sound_mode().support_sound_mode(),
            SoundModeSupport::Unknown
        );
    }
}

// ============================================================================
// AppCommand interface
// ============================================================================

mod appcommand {
    use super::*;

    #[tokio::test]
    async fn reads_surround_status() {
        let mock_server = MockServer::start().await;
        mount_appcommand(&mock_server, "Dolby Digital   ").await;

        let device = modern_device(&mock_server);
        device.update().await.unwrap();

        let sound_mode = device.sound_mode();
        assert_eq!(sound_mode.support_sound_mode(), SoundModeSupport::Supported);
        assert_eq!(sound_mode.sound_mode_raw().as_deref(), Some("Dolby Digital"));
        assert_eq!(sound_mode.sound_mode().as_deref(), Some("DOLBY DIGITAL"));
    }

    #[tokio::test]
    async fn setup_registers_update_tag() {
        let mock_server = MockServer::start().await;
        mount_appcommand(&mock_server, "Stereo").await;

        let device = modern_device(&mock_server);
        assert!(device.protocol().appcommand_update_tags().is_empty());

        device.update().await.unwrap();
        device.update().await.unwrap();

        assert_eq!(
            device.protocol().appcommand_update_tags(),
            vec![AppCommand::GetSurroundModeStatus]
        );
    }

    #[tokio::test]
    async fn same_cache_id_shares_one_request() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(APPCOMMAND))
            .respond_with(ResponseTemplate::new(200).set_body_string(appcommand_response("Movie")))
            .expect(2)
            .mount(&mock_server)
            .await;

        let device = modern_device(&mock_server);
        let sound_mode = device.sound_mode();

        let first = CacheId::new();
        sound_mode.update(false, Some(&first)).await.unwrap();
        sound_mode.update(false, Some(&first)).await.unwrap();

        let second = CacheId::new();
        sound_mode.update(false, Some(&second)).await.unwrap();

        assert_eq!(sound_mode.sound_mode().as_deref(), Some("MOVIE"));
    }

    #[tokio::test]
    async fn missing_surround_tag_is_a_processing_error() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(APPCOMMAND))
            .respond_with(
                ResponseTemplate::new(200).set_body_string("<rx><cmd><zone1>ON</zone1></cmd></rx>"),
            )
            .mount(&mock_server)
            .await;

        let device = modern_device(&mock_server);
        let err = device.update().await.unwrap_err();

        assert!(err.is_processing());
        assert_eq!(device.sound_mode().sound_mode_raw(), None);
    }

    #[tokio::test]
    async fn unknown_mode_is_added_to_list() {
        let mock_server = MockServer::start().await;
        mount_appcommand(&mock_server, "Auro-3D Upmixer").await;

        let device = modern_device(&mock_server);
        device.update().await.unwrap();

        let sound_mode = device.sound_mode();
        assert_eq!(sound_mode.sound_mode().as_deref(), Some("AURO-3D UPMIXER"));
        assert!(
            sound_mode
                .sound_mode_list()
                .contains(&"AURO-3D UPMIXER".to_string())
        );
        assert!(
            !ModeMap::default()
                .names()
                .any(|name| name == "AURO-3D UPMIXER")
        );
    }
}

// ============================================================================
// Commands
// ============================================================================

mod commands {
    use super::*;

    #[tokio::test]
    async fn select_sound_mode() {
        let mock_server = MockServer::start().await;
        mount_command(&mock_server).await;

        let device = modern_device(&mock_server);
        device.sound_mode().set_sound_mode("DOLBY DIGITAL").await.unwrap();

        assert_eq!(command_queries(&mock_server).await, vec!["MSDOLBY%20DIGITAL"]);
    }

    #[tokio::test]
    async fn select_all_zone_stereo() {
        let mock_server = MockServer::start().await;
        mount_command(&mock_server).await;

        let device = modern_device(&mock_server);
        device.sound_mode().set_sound_mode(ALL_ZONE_STEREO).await.unwrap();

        assert_eq!(command_queries(&mock_server).await, vec!["MNZST%20ON"]);
    }

    #[tokio::test]
    async fn leaving_all_zone_stereo_turns_it_off_first() {
        let mock_server = MockServer::start().await;
        mount_appcommand(&mock_server, "ALL ZONE STEREO").await;
        mount_command(&mock_server).await;

        let device = modern_device(&mock_server);
        device.update().await.unwrap();
        assert_eq!(
            device.sound_mode().sound_mode().as_deref(),
            Some(ALL_ZONE_STEREO)
        );

        device.sound_mode().set_sound_mode("MOVIE").await.unwrap();

        assert_eq!(
            command_queries(&mock_server).await,
            vec!["MNZST%20OFF", "MSMOVIE"]
        );
    }

    #[tokio::test]
    async fn failed_command_is_reported() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(COMMAND))
            .respond_with(ResponseTemplate::new(500))
            .mount(&mock_server)
            .await;

        let device = modern_device(&mock_server);
        let result = device.sound_mode().set_sound_mode("STEREO").await;

        assert!(matches!(
            result,
            Err(Error::Protocol(ProtocolError::HttpStatus(500)))
        ));
    }
}

// ============================================================================
// Error handling
// ============================================================================

mod errors {
    use super::*;

    #[tokio::test]
    async fn appcommand_server_error() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(APPCOMMAND))
            .respond_with(ResponseTemplate::new(500))
            .mount(&mock_server)
            .await;

        let device = modern_device(&mock_server);
        let result = device.update().await;

        assert!(matches!(
            result,
            Err(Error::Protocol(ProtocolError::HttpStatus(500)))
        ));
    }

    #[tokio::test]
    async fn appcommand_unauthorized() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(APPCOMMAND))
            .respond_with(ResponseTemplate::new(401))
            .mount(&mock_server)
            .await;

        let device = modern_device(&mock_server);
        let result = device.update().await;

        assert!(matches!(
            result,
            Err(Error::Protocol(ProtocolError::AuthenticationFailed))
        ));
    }

    #[tokio::test]
    async fn connection_refused() {
        // Nothing listens on this port
        let device = Device::http("127.0.0.1:59999")
            .with_receiver_type(ReceiverType::AvrX2016)
            .build()
            .unwrap();

        let result = device.update().await;

        assert!(matches!(
            result,
            Err(Error::Protocol(ProtocolError::ConnectionFailed(_)))
        ));
        assert_eq!(device.sound_mode().sound_mode_raw(), None);
    }

    #[tokio::test]
    async fn unset_update_method_sends_nothing() {
        let mock_server = MockServer::start().await;

        let device = Device::http(host(&mock_server))
            .with_update_method(None)
            .build()
            .unwrap();
        let result = device.update().await;

        assert!(matches!(
            result,
            Err(Error::Device(DeviceError::UpdateMethodNotSet))
        ));
        assert!(
            mock_server
                .received_requests()
                .await
                .unwrap()
                .is_empty()
        );
    }
}

// ============================================================================
// Configuration
// ============================================================================

mod config {
    use super::*;

    #[tokio::test]
    async fn device_from_json_config_with_custom_table() {
        let mock_server = MockServer::start().await;
        mount_appcommand(&mock_server, "2ch Stereo").await;

        let json = format!(
            r#"{{
                "host": "{}",
                "receiver_type": "avr-x",
                "use_avr_2016_update": true,
                "sound_mode_map": [
                    ["STEREO", ["STEREO", "2CH STEREO"]],
                    ["MOVIE", ["DOLBY DIGITAL"]]
                ]
            }}"#,
            host(&mock_server)
        );
        let config = ReceiverConfig::from_json(&json).unwrap();
        let device = Device::from_config(&config).unwrap();

        device.update().await.unwrap();

        let sound_mode = device.sound_mode();
        assert_eq!(sound_mode.support_sound_mode(), SoundModeSupport::Supported);
        assert_eq!(sound_mode.sound_mode().as_deref(), Some("STEREO"));
        assert_eq!(sound_mode.sound_mode_list(), vec!["STEREO", "MOVIE"]);
    }
}
