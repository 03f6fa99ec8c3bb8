//! Connection lifecycle, driven through the row-syntax macro.
//!
//! Run with: cargo run --example connection

use trellis::{transition_table, Event, StateMachine};

#[derive(Debug)]
struct Connect;
#[derive(Debug)]
struct Established;
#[derive(Debug)]
struct Timeout;
#[derive(Debug)]
struct Disconnect;
#[derive(Debug)]
struct Ping {
    valid: bool,
}

impl Event for Connect {}
impl Event for Established {}
impl Event for Timeout {}
impl Event for Disconnect {}
impl Event for Ping {}

fn main() {
    let table = transition_table! {
        "*Disconnected" + Connect / |_: &Connect| println!("establish") => "Connecting",
        "Connecting" + Established => "Connected",
        "Connected" + Ping [|e: &Ping| e.valid] / |_: &Ping| println!("setup"),
        "Connected" + Timeout / |_: &Timeout| println!("establish") => "Connecting",
        "Connected" + Disconnect / |_: &Disconnect| println!("close") => "Disconnected",
    }
    .expect("table builds");

    let mut machine = StateMachine::new(table).expect("machine builds").with_log();

    machine.process_event(&Connect);
    machine.process_event(&Established);
    machine.process_event(&Ping { valid: true });
    machine.process_event(&Ping { valid: false });
    machine.process_event(&Disconnect);

    println!("final state: {:?}", machine.current_states());

    if let Some(log) = machine.log() {
        println!("path: {:?}", log.path(0));
    }
}
