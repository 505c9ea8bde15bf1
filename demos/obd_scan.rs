use obdii::can::{Identifier, ENGINE_ECU};
use obdii::isotp::IsoTPConfig;
use obdii::obd::{OBDClient, ENGINE_COOLANT_TEMPERATURE, ENGINE_RPM, TROUBLE_CODES, VEHICLE_SPEED, VIN};
use obdii::socketcan::IsoTPSocket;
use obdii::StreamExt;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let interface = std::env::args().nth(1).unwrap_or_else(|| "can0".to_owned());
    let config = IsoTPConfig::new(&interface, Identifier::Standard(ENGINE_ECU));
    let socket = IsoTPSocket::open(config).unwrap();
    let obd = OBDClient::new(socket);

    let supported = obd.supported_commands().await.unwrap();
    for command in &supported {
        match obd.query(command).await {
            Ok(response) => println!("{}: {}", command, response.value),
            Err(e) => println!("{}: {}", command, e),
        }
    }

    if supported.contains(VIN) {
        let vin = obd.query(VIN).await.unwrap();
        println!("VIN: {}", vin.value);
    }

    let dtcs = obd.query(TROUBLE_CODES).await.unwrap();
    println!("Stored trouble codes: {}", dtcs.value);

    let commands = [ENGINE_RPM, VEHICLE_SPEED, ENGINE_COOLANT_TEMPERATURE];
    let stream = obd.stream(&commands, std::time::Duration::from_millis(500));
    tokio::pin!(stream);

    while let Some(response) = stream.next().await {
        match response {
            Ok(response) => println!("{}: {}", response.command.name, response.value),
            Err(e) => println!("Error: {}", e),
        }
    }
}
