use obdii::obd::{
    self, Command, NegativeResponseCode, OBDClient, OxygenSensor, Value, ECU_NAME, ENGINE_COOLANT_TEMPERATURE,
    ENGINE_RPM, FUEL_TANK_LEVEL, OXYGEN_SENSOR_FUEL_TRIM, SHORT_TERM_FUEL_TRIM_BANK_1, TROUBLE_CODES,
    VEHICLE_SPEED, VIN, VIN_MESSAGE_COUNT,
};
use obdii::transport::Transport;
use obdii::{Error, Result, StreamExt};

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Clone)]
enum Reply {
    Data(Vec<u8>),
    /// First frame answers the request, the rest are only handed out by `receive`
    Sequence(Vec<Vec<u8>>),
    Timeout,
}

/// Scripted ECU. Unknown requests time out.
#[derive(Default, Clone)]
struct MockEcu {
    replies: HashMap<Vec<u8>, Reply>,
    requests: Arc<Mutex<Vec<Vec<u8>>>>,
    queued: VecDeque<Vec<u8>>,
    in_flight: Arc<AtomicBool>,
    delay: Option<Duration>,
}

impl MockEcu {
    fn reply(mut self, request: &[u8], response: &[u8]) -> Self {
        self.replies.insert(request.to_vec(), Reply::Data(response.to_vec()));
        self
    }

    fn reply_sequence(mut self, request: &[u8], responses: &[&[u8]]) -> Self {
        let responses = responses.iter().map(|r| r.to_vec()).collect();
        self.replies.insert(request.to_vec(), Reply::Sequence(responses));
        self
    }

    fn timeout(mut self, request: &[u8]) -> Self {
        self.replies.insert(request.to_vec(), Reply::Timeout);
        self
    }

    fn supported(self, mode: u8, pid: u8, mask: u32) -> Self {
        let mut response = vec![mode + 0x40, pid];
        response.extend(mask.to_be_bytes());
        self.reply(&[mode, pid], &response)
    }

    fn requests(&self) -> Vec<Vec<u8>> {
        self.requests.lock().unwrap().clone()
    }
}

impl Transport for MockEcu {
    async fn request(&mut self, payload: &[u8]) -> Result<Vec<u8>> {
        assert!(
            !self.in_flight.swap(true, Ordering::SeqCst),
            "request issued while another one is outstanding"
        );
        self.requests.lock().unwrap().push(payload.to_vec());

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let reply = self.replies.get(payload).cloned();
        self.in_flight.store(false, Ordering::SeqCst);

        self.queued.clear();
        match reply {
            Some(Reply::Data(response)) => Ok(response),
            Some(Reply::Sequence(responses)) => {
                self.queued.extend(responses);
                self.queued.pop_front().ok_or(Error::Timeout)
            }
            Some(Reply::Timeout) | None => Err(Error::Timeout),
        }
    }

    async fn receive(&mut self) -> Result<Vec<u8>> {
        self.queued.pop_front().ok_or(Error::Timeout)
    }
}

/// Bit of `pid` in the "supported PIDs" mask of the range starting at `base`
fn bit(base: u8, pid: u8) -> u32 {
    0x8000_0000 >> (pid - base - 1)
}

fn assert_close(actual: f64, expected: f64) {
    assert!((actual - expected).abs() < 1e-3, "expected {}, got {}", expected, actual);
}

#[tokio::test]
async fn discovery_scans_advertised_ranges() {
    let ecu = MockEcu::default()
        .supported(0x01, 0x00, bit(0x00, 0x05) | bit(0x00, 0x0c) | bit(0x00, 0x20))
        .supported(0x01, 0x20, bit(0x20, 0x2f) | bit(0x20, 0x40))
        .supported(0x01, 0x40, bit(0x40, 0x42))
        .supported(0x09, 0x00, bit(0x00, 0x02) | bit(0x00, 0x0a));
    let obd = OBDClient::new(ecu.clone());

    let supported = obd.supported_commands().await.unwrap();

    assert_eq!(
        ecu.requests(),
        vec![vec![0x01, 0x00], vec![0x01, 0x20], vec![0x01, 0x40], vec![0x09, 0x00]]
    );

    let pids: Vec<(u8, Option<u8>)> = supported.iter().map(|c| (c.mode as u8, c.pid)).collect();
    assert_eq!(
        pids,
        vec![
            (0x01, Some(0x00)),
            (0x01, Some(0x05)),
            (0x01, Some(0x0c)),
            (0x01, Some(0x20)),
            (0x01, Some(0x2f)),
            (0x01, Some(0x40)),
            (0x01, Some(0x42)),
            (0x03, None),
            (0x09, Some(0x00)),
            (0x09, Some(0x02)),
            (0x09, Some(0x0a)),
        ]
    );
    assert!(supported.contains(FUEL_TANK_LEVEL));
    assert!(supported.contains(ECU_NAME));
    assert!(!supported.contains(VIN_MESSAGE_COUNT));
}

#[tokio::test]
async fn discovery_stops_when_next_range_not_advertised() {
    let ecu = MockEcu::default()
        .supported(0x01, 0x00, bit(0x00, 0x0c))
        .supported(0x01, 0x20, 0xffff_ffff)
        .supported(0x09, 0x00, 0);
    let obd = OBDClient::new(ecu.clone());

    let supported = obd.supported_commands().await.unwrap();

    assert_eq!(ecu.requests(), vec![vec![0x01, 0x00], vec![0x09, 0x00]]);
    assert!(supported.contains(ENGINE_RPM));
    assert!(!supported.contains(VEHICLE_SPEED));
    assert!(supported.contains(TROUBLE_CODES));
    assert!(!supported.contains(VIN));
}

#[tokio::test]
async fn discovery_propagates_transport_errors() {
    let obd = OBDClient::new(MockEcu::default());
    assert_eq!(obd.supported_commands().await, Err(Error::Timeout));

    // An advertised range that never answers is a bus problem, not an unsupported range
    let ecu = MockEcu::default()
        .supported(0x01, 0x00, bit(0x00, 0x20))
        .timeout(&[0x01, 0x20]);
    let obd = OBDClient::new(ecu);
    assert_eq!(obd.supported_commands().await, Err(Error::Timeout));
}

#[tokio::test]
async fn discovery_treats_negative_responses_as_unsupported() {
    let ecu = MockEcu::default()
        .supported(0x01, 0x00, bit(0x00, 0x0d) | bit(0x00, 0x20))
        .reply(&[0x01, 0x20], &[0x7f, 0x01, 0x31])
        .reply(&[0x09, 0x00], &[0x7f, 0x09, 0x11]);
    let obd = OBDClient::new(ecu.clone());

    let supported = obd.supported_commands().await.unwrap();

    assert_eq!(ecu.requests(), vec![vec![0x01, 0x00], vec![0x01, 0x20], vec![0x09, 0x00]]);
    assert!(supported.contains(VEHICLE_SPEED));
    assert_eq!(supported.supported_pids().current_data(1), 0);
    assert_eq!(supported.supported_pids().vehicle_information(), 0);
    assert!(!supported.contains(VIN));
}

#[tokio::test]
async fn discovery_rejects_negative_first_range() {
    let ecu = MockEcu::default().reply(&[0x01, 0x00], &[0x7f, 0x01, 0x11]);
    let obd = OBDClient::new(ecu.clone());

    assert_eq!(
        obd.supported_commands().await,
        Err(Error::OBDError(obd::Error::NegativeResponse(
            NegativeResponseCode::ServiceNotSupported
        )))
    );
    assert_eq!(ecu.requests(), vec![vec![0x01, 0x00]]);
}

#[tokio::test]
async fn discovery_rejects_malformed_bitfield() {
    let ecu = MockEcu::default().reply(&[0x01, 0x00], &[0x41, 0x00, 0x80]);
    let obd = OBDClient::new(ecu);

    assert_eq!(
        obd.supported_commands().await,
        Err(Error::OBDError(obd::Error::InvalidResponseLength {
            expected: 6,
            actual: 3
        }))
    );
}

#[tokio::test]
async fn query_numeric() {
    let ecu = MockEcu::default()
        .reply(&[0x01, 0x0c], &[0x41, 0x0c, 0x1a, 0x00])
        .reply(&[0x01, 0x05], &[0x41, 0x05, 0x5a])
        .reply(&[0x01, 0x06], &[0x41, 0x06, 0x80]);
    let obd = OBDClient::new(ecu);

    let rpm = obd.query(ENGINE_RPM).await.unwrap();
    assert_eq!(rpm.command, ENGINE_RPM);
    assert_close(rpm.value.as_numeric().unwrap(), 1664.0);

    let coolant = obd.query(ENGINE_COOLANT_TEMPERATURE).await.unwrap();
    assert_close(coolant.value.as_numeric().unwrap(), 50.0);

    let trim = obd.query(SHORT_TERM_FUEL_TRIM_BANK_1).await.unwrap();
    assert_close(trim.value.as_numeric().unwrap(), 0.0);
}

#[tokio::test]
async fn query_oxygen_sensor() {
    let ecu = MockEcu::default().reply(&[0x01, 0x15], &[0x41, 0x15, 0x64, 0xc0]);
    let obd = OBDClient::new(ecu);

    let response = obd.query(OXYGEN_SENSOR_FUEL_TRIM[1]).await.unwrap();
    match response.value {
        Value::OxygenSensor(OxygenSensor::VoltageFuelTrim {
            voltage,
            short_term_fuel_trim,
        }) => {
            assert_close(voltage, 0.5);
            assert_close(short_term_fuel_trim, 50.0);
        }
        other => panic!("unexpected {:?}", other),
    }
}

#[tokio::test]
async fn query_trouble_codes() {
    let ecu = MockEcu::default().reply(&[0x03], &[0x43, 0x38, 0xab, 0xe0, 0xfc, 0x57, 0xde]);
    let obd = OBDClient::new(ecu);

    let response = obd.query(TROUBLE_CODES).await.unwrap();
    let codes: Vec<String> = response
        .value
        .as_trouble_codes()
        .unwrap()
        .iter()
        .map(|c| c.to_string())
        .collect();
    assert_eq!(codes, vec!["P38AB", "U20FC", "C17DE"]);
}

#[tokio::test]
async fn query_vin_and_ecu_name() {
    let mut vin = vec![0x49, 0x02];
    vin.extend(b"1G1JC5444R7252367");

    let mut ecu_name = vec![0x49, 0x0a];
    ecu_name.extend(b"ECM\0-EngineControl\0\0");

    let ecu = MockEcu::default()
        .reply(&[0x09, 0x02], &vin)
        .reply(&[0x09, 0x0a], &ecu_name)
        .reply(&[0x09, 0x01], &[0x49, 0x01, 0x05]);
    let obd = OBDClient::new(ecu);

    let response = obd.query(VIN).await.unwrap();
    assert_eq!(response.value.as_str(), Some("1G1JC5444R7252367"));

    let response = obd.query(ECU_NAME).await.unwrap();
    assert_eq!(response.value, Value::String("ECM".to_string()));

    let response = obd.query(VIN_MESSAGE_COUNT).await.unwrap();
    assert_eq!(response.value.as_numeric(), Some(5.0));
}

#[tokio::test]
async fn response_pending_waits_for_answer() {
    let mut vin = vec![0x49, 0x02];
    vin.extend(b"1G1JC5444R7252367");

    let ecu = MockEcu::default()
        .reply_sequence(&[0x09, 0x02], &[&[0x7f, 0x09, 0x78], &[0x7f, 0x09, 0x78], &vin])
        .reply(&[0x01, 0x0d], &[0x41, 0x0d, 0x32]);
    let obd = OBDClient::new(ecu.clone());

    let response = obd.query(VIN).await.unwrap();
    assert_eq!(response.value.as_str(), Some("1G1JC5444R7252367"));

    // The next request only goes out once the real answer was read
    let response = obd.query(VEHICLE_SPEED).await.unwrap();
    assert_eq!(response.value.as_numeric(), Some(50.0));
    assert_eq!(ecu.requests(), vec![vec![0x09, 0x02], vec![0x01, 0x0d]]);
}

#[tokio::test]
async fn response_pending_without_answer_times_out() {
    let ecu = MockEcu::default().reply_sequence(&[0x09, 0x02], &[&[0x7f, 0x09, 0x78]]);
    let obd = OBDClient::new(ecu);

    assert_eq!(obd.query(VIN).await.unwrap_err(), Error::Timeout);
}

#[tokio::test]
async fn response_pending_for_other_mode_is_not_awaited() {
    let ecu = MockEcu::default().reply_sequence(&[0x09, 0x02], &[&[0x7f, 0x01, 0x78], &[0x49, 0x02]]);
    let obd = OBDClient::new(ecu);

    assert_eq!(obd.request(VIN).await, Ok(vec![0x7f, 0x01, 0x78]));
}

#[tokio::test]
async fn empty_vin() {
    let ecu = MockEcu::default().reply(&[0x09, 0x02], &[0x49, 0x02]);
    let obd = OBDClient::new(ecu);

    let response = obd.query(VIN).await.unwrap();
    assert_eq!(response.value.as_str(), Some(""));
}

#[tokio::test]
async fn query_errors_are_distinguished() {
    let ecu = MockEcu::default()
        .reply(&[0x01, 0x0c], &[0x41, 0x0d, 0x1a, 0x00])
        .reply(&[0x01, 0x0d], &[0x7f, 0x01, 0x12])
        .reply(&[0x03], &[0x43, 0x01, 0x02, 0x03])
        .reply(&[0x09, 0x02], &[]);
    let obd = OBDClient::new(ecu);

    let err = obd.query(ENGINE_RPM).await.unwrap_err();
    assert_eq!(err, Error::OBDError(obd::Error::InvalidPid(0x0d)));
    assert!(!err.is_transport());

    let err = obd.query(VEHICLE_SPEED).await.unwrap_err();
    assert_eq!(
        err,
        Error::OBDError(obd::Error::NegativeResponse(
            NegativeResponseCode::SubFunctionNotSupported
        ))
    );

    let err = obd.query(TROUBLE_CODES).await.unwrap_err();
    assert_eq!(err, Error::OBDError(obd::Error::MalformedTroubleCodes(3)));

    let err = obd.query(VIN).await.unwrap_err();
    assert_eq!(err, Error::OBDError(obd::Error::EmptyResponse));

    let err = obd.query(FUEL_TANK_LEVEL).await.unwrap_err();
    assert_eq!(err, Error::Timeout);
    assert!(err.is_transport());
}

#[tokio::test]
async fn raw_request() {
    let ecu = MockEcu::default().reply(&[0x01, 0x0c], &[0x41, 0x0d]);
    let obd = OBDClient::new(ecu);

    assert_eq!(obd.request(ENGINE_RPM).await, Ok(vec![0x41, 0x0d]));

    let ecu = obd.into_inner();
    assert_eq!(ecu.requests(), vec![vec![0x01, 0x0c]]);
}

#[tokio::test]
async fn concurrent_queries_are_serialized() {
    let mut ecu = MockEcu::default()
        .reply(&[0x01, 0x0c], &[0x41, 0x0c, 0x1a, 0x00])
        .reply(&[0x01, 0x0d], &[0x41, 0x0d, 0x37]);
    ecu.delay = Some(Duration::from_millis(2));
    let obd = OBDClient::new(ecu.clone());

    let queries = (0..8).map(|i| {
        let command: &'static Command = if i % 2 == 0 { ENGINE_RPM } else { VEHICLE_SPEED };
        obd.query(command)
    });
    let results = futures::future::join_all(queries).await;

    assert!(results.iter().all(|r| r.is_ok()));
    assert_eq!(ecu.requests().len(), 8);
}

#[tokio::test]
async fn stream_polls_commands_in_order() {
    let ecu = MockEcu::default()
        .reply(&[0x01, 0x0c], &[0x41, 0x0c, 0x1a, 0x00])
        .reply(&[0x01, 0x0d], &[0x41, 0x0d, 0x37]);
    let obd = OBDClient::new(ecu.clone());

    let commands = [ENGINE_RPM, VEHICLE_SPEED];
    let results: Vec<Result<obd::Response>> = obd
        .stream(&commands, Duration::from_millis(1))
        .take(5)
        .collect()
        .await;

    let values: Vec<f64> = results
        .into_iter()
        .map(|r| r.unwrap().value.as_numeric().unwrap())
        .collect();
    assert_eq!(values, vec![1664.0, 55.0, 1664.0, 55.0, 1664.0]);
    assert_eq!(ecu.requests().len(), 5);
}

#[tokio::test]
async fn stream_yields_errors_and_continues() {
    let ecu = MockEcu::default().reply(&[0x01, 0x0d], &[0x41, 0x0d, 0x37]);
    let obd = OBDClient::new(ecu);

    let commands = [ENGINE_RPM, VEHICLE_SPEED];
    let results: Vec<Result<obd::Response>> = obd
        .stream(&commands, Duration::from_millis(1))
        .take(4)
        .collect()
        .await;

    assert_eq!(results[0], Err(Error::Timeout));
    assert!(results[1].is_ok());
    assert_eq!(results[2], Err(Error::Timeout));
    assert!(results[3].is_ok());
}
