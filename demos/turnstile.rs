//! Two-region turnstile: the gate and its alarm evolve independently.
//!
//! Run with: cargo run --example turnstile

use trellis::{transition, Event, StateMachine, TransitionTable};

#[derive(Debug)]
struct Coin;
#[derive(Debug)]
struct Push;
#[derive(Debug)]
struct Tamper;
#[derive(Debug)]
struct Reset;

impl Event for Coin {}
impl Event for Push {}
impl Event for Tamper {}
impl Event for Reset {}

fn main() {
    let table = TransitionTable::builder()
        // Region 0: the gate
        .row(transition("*Locked").on::<Coin>().run(|| println!("unlock")).to("Unlocked"))
        .row(transition("Unlocked").on::<Push>().run(|| println!("rotate")).to("Locked"))
        // Region 1: the alarm
        .row(transition("*Quiet").on::<Tamper>().run(|| println!("siren on")).to("Ringing"))
        .row(transition("Ringing").on::<Reset>().run(|| println!("siren off")).to("Quiet"))
        .build()
        .expect("table builds");

    let mut machine = StateMachine::new(table).expect("machine builds");
    println!("start: {:?}", machine.current_states());

    machine.process_event(&Coin);
    machine.process_event(&Tamper);
    println!("after coin + tamper: {:?}", machine.current_states());

    machine.process_event(&Push);
    machine.process_event(&Reset);
    println!("after push + reset: {:?}", machine.current_states());
}
