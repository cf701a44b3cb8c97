//! Broadcast network of addressed machines
//!
//! Machines exchange `{dest, x, y}` packets. Each machine is booted with its
//! address as its first input; afterwards the driver visits every machine
//! once per tick, feeding the idle sentinel to any machine blocked on an
//! empty input queue. Packets addressed outside the machine range (255 in
//! the classic puzzle) go to the NAT, which restarts an idle network by replaying its last packet to
//! machine 0. The run ends when the NAT replays the same Y twice in a row.

use intcode_spec::{Program, Word};
use thiserror::Error;

use crate::error::RuntimeError;
use crate::state::Status;
use crate::vm::Machine;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NetworkError {
    #[error(transparent)]
    Runtime(#[from] RuntimeError),

    #[error("Invalid network configuration: {0}")]
    InvalidConfig(String),

    #[error("Machine {address} halted")]
    MachineHalted { address: usize },

    #[error("Machine {address} stopped after {words} words of a packet")]
    PartialPacket { address: usize, words: usize },

    #[error("Tick limit exceeded: {limit}")]
    TickLimitExceeded { limit: u64 },
}

pub type Result<T> = std::result::Result<T, NetworkError>;

/// Network configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkConfig {
    /// Number of addressed machines
    pub size: usize,

    /// Word fed to a machine that asks for input with nothing queued
    pub idle_value: Word,

    /// Give up after this many ticks
    pub tick_limit: Option<u64>,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            size: 50,
            idle_value: -1,
            tick_limit: None,
        }
    }
}

impl NetworkConfig {
    pub fn validate(&self) -> Result<()> {
        if self.size == 0 {
            return Err(NetworkError::InvalidConfig(
                "network needs at least one machine".to_string(),
            ));
        }
        Ok(())
    }
}

/// A routed packet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Packet {
    pub dest: Word,
    pub x: Word,
    pub y: Word,
}

/// Result of a network run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NetworkOutcome {
    /// Y of the first packet the NAT received
    pub first_nat_y: Word,
    /// Y the NAT replayed twice in a row
    pub repeated_y: Word,
    pub ticks: u64,
    pub idle_events: u64,
}

#[derive(Debug, Clone, Default)]
struct Nat {
    last: Option<(Word, Word)>,
    first_y: Option<Word>,
    sent_y: Option<Word>,
}

impl Nat {
    fn receive(&mut self, x: Word, y: Word) {
        if self.first_y.is_none() {
            tracing::info!(x, y, "first packet received by NAT");
            self.first_y = Some(y);
        }
        self.last = Some((x, y));
    }
}

/// Broadcast network driver
#[derive(Debug, Clone)]
pub struct Network {
    machines: Vec<Machine>,
    config: NetworkConfig,
    nat: Nat,
    ticks: u64,
    idle_events: u64,
}

impl Network {
    /// Build `config.size` machines running `program` and boot them
    pub fn new(program: &Program, config: NetworkConfig) -> Result<Self> {
        config.validate()?;

        let mut network = Network {
            machines: (0..config.size).map(|_| Machine::new(program)).collect(),
            config,
            nat: Nat::default(),
            ticks: 0,
            idle_events: 0,
        };
        network.boot()?;
        Ok(network)
    }

    /// Hand every machine its address
    fn boot(&mut self) -> Result<()> {
        for (address, machine) in self.machines.iter_mut().enumerate() {
            if machine.run_to_any_io()? == Status::Halted {
                return Err(NetworkError::MachineHalted { address });
            }
            machine.push_input(address as Word);
            if machine.run_to_any_io()? == Status::Halted {
                return Err(NetworkError::MachineHalted { address });
            }
        }
        tracing::debug!(size = self.machines.len(), "network booted");
        Ok(())
    }

    /// Visit every machine once. Returns `true` when the network was idle:
    /// every machine asked for input it did not have and no packet moved.
    pub fn tick(&mut self) -> Result<bool> {
        let mut stalled = 0;
        let mut routed = false;

        for address in 0..self.machines.len() {
            let machine = &mut self.machines[address];
            if machine.is_halted() {
                return Err(NetworkError::MachineHalted { address });
            }

            // Let a blocked machine take everything already queued for it
            if machine.status() == Status::PendingInput {
                while machine.has_input() {
                    if machine.run_to_any_io()? == Status::Halted {
                        return Err(NetworkError::MachineHalted { address });
                    }
                }
            }

            let blocked = match machine.run_to_any_io()? {
                Status::Halted => return Err(NetworkError::MachineHalted { address }),
                Status::PendingInput => {
                    machine.push_input(self.config.idle_value);
                    stalled += 1;
                    true
                }
                _ => false,
            };

            if machine.has_output() {
                for packet in collect_packets(machine, address, !blocked)? {
                    self.route(address, packet);
                    routed = true;
                }
            }
        }

        self.ticks += 1;
        Ok(stalled == self.machines.len() && !routed)
    }

    fn route(&mut self, from: usize, packet: Packet) {
        tracing::debug!(from, dest = packet.dest, x = packet.x, y = packet.y, "packet");
        match usize::try_from(packet.dest) {
            Ok(dest) if dest < self.machines.len() => {
                self.machines[dest].push_inputs([packet.x, packet.y]);
            }
            _ => self.nat.receive(packet.x, packet.y),
        }
    }

    /// Replay the NAT's last packet to machine 0. Returns the Y if it matches
    /// the previous replay.
    fn wake(&mut self) -> Option<Word> {
        let Some((x, y)) = self.nat.last else {
            tracing::debug!("network idle with nothing for the NAT to send");
            return None;
        };

        tracing::info!(x, y, "NAT wakes machine 0");
        self.machines[0].push_inputs([x, y]);
        if self.nat.sent_y == Some(y) {
            tracing::info!(y, "NAT sent the same Y twice in a row");
            return Some(y);
        }
        self.nat.sent_y = Some(y);
        None
    }

    /// Tick until the NAT repeats itself
    pub fn run(&mut self) -> Result<NetworkOutcome> {
        loop {
            if let Some(limit) = self.config.tick_limit {
                if self.ticks >= limit {
                    return Err(NetworkError::TickLimitExceeded { limit });
                }
            }

            if !self.tick()? {
                continue;
            }
            self.idle_events += 1;
            if let Some(repeated_y) = self.wake() {
                return Ok(NetworkOutcome {
                    first_nat_y: self.nat.first_y.unwrap_or(repeated_y),
                    repeated_y,
                    ticks: self.ticks,
                    idle_events: self.idle_events,
                });
            }
        }
    }

    pub fn machine(&self, address: usize) -> Option<&Machine> {
        self.machines.get(address)
    }

    pub fn size(&self) -> usize {
        self.machines.len()
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn idle_events(&self) -> u64 {
        self.idle_events
    }

    /// Last packet received by the NAT
    pub fn nat_packet(&self) -> Option<(Word, Word)> {
        self.nat.last
    }

    pub fn first_nat_y(&self) -> Option<Word> {
        self.nat.first_y
    }
}

/// Take queued output as whole packets. With `complete`, a trailing partial
/// packet is finished by running the machine to further outputs.
fn collect_packets(machine: &mut Machine, address: usize, complete: bool) -> Result<Vec<Packet>> {
    while machine.output_len() % 3 != 0 {
        if !complete || machine.run_to_output()? != Status::Paused {
            return Err(NetworkError::PartialPacket {
                address,
                words: machine.output_len() % 3,
            });
        }
    }

    Ok(machine
        .drain_output()
        .chunks_exact(3)
        .map(|p| Packet {
            dest: p[0],
            x: p[1],
            y: p[2],
        })
        .collect())
}
