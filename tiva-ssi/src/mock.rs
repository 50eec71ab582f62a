//! Recording register model for host tests.
//!
//! Control registers behave as plain storage. The data, status and interrupt
//! registers follow a small behavioural model of the unit:
//!
//! - DR writes are logged per unit and consume TX FIFO space
//! - SR.TNF is set while TX FIFO space remains
//! - SR.BSY reads as set for a configurable number of polls after each DR write
//! - DR reads pop a scripted RX FIFO; SR.RNE tracks it
//! - ICR writes clear the matching MIS bits

extern crate std;

use core::cell::RefCell;
use std::vec::Vec;

use crate::constants::{Word, FIFO_DEPTH, NUM_UNITS};
use crate::hw::registers as reg;
use crate::hw::{Register, RegisterBlock, Unit};

const NUM_REGISTERS: usize = 9;

fn slot(register: Register) -> usize {
    match register {
        Register::Cr0 => 0,
        Register::Cr1 => 1,
        Register::Dr => 2,
        Register::Sr => 3,
        Register::Cpsr => 4,
        Register::Im => 5,
        Register::Mis => 6,
        Register::Icr => 7,
        Register::Cc => 8,
    }
}

#[derive(Default, Clone)]
struct UnitModel {
    regs: [u32; NUM_REGISTERS],
    transmitted: Vec<Word>,
    rx_fifo: Vec<Word>,
    tx_space: usize,
    busy_polls: usize,
    busy_remaining: usize,
    stuck_busy: bool,
}

struct State {
    units: [UnitModel; NUM_UNITS],
    log: Vec<(Unit, Register, u32)>,
}

pub(crate) struct MockRegisters {
    state: RefCell<State>,
}

impl MockRegisters {
    /// Every unit starts with all interrupts masked and an empty TX FIFO.
    pub fn new() -> Self {
        let mut unit = UnitModel::default();
        unit.regs[slot(Register::Im)] = reg::INT_ALL;
        unit.tx_space = FIFO_DEPTH;
        MockRegisters {
            state: RefCell::new(State {
                units: core::array::from_fn(|_| unit.clone()),
                log: Vec::new(),
            }),
        }
    }

    /// Current stored value of a register.
    pub fn reg(&self, unit: Unit, register: Register) -> u32 {
        self.state.borrow().units[unit.index()].regs[slot(register)]
    }

    /// Words written to DR, in order.
    pub fn transmitted(&self, unit: Unit) -> Vec<Word> {
        self.state.borrow().units[unit.index()].transmitted.clone()
    }

    /// Every write, in chronological order.
    pub fn log(&self) -> Vec<(Unit, Register, u32)> {
        self.state.borrow().log.clone()
    }

    /// Values written to one register of one unit.
    pub fn writes_to(&self, unit: Unit, register: Register) -> Vec<u32> {
        self.state
            .borrow()
            .log
            .iter()
            .filter(|(u, r, _)| *u == unit && *r == register)
            .map(|(_, _, v)| *v)
            .collect()
    }

    pub fn write_count(&self) -> usize {
        self.state.borrow().log.len()
    }

    pub fn set_tx_space(&self, unit: Unit, space: usize) {
        self.state.borrow_mut().units[unit.index()].tx_space = space;
    }

    /// Number of SR polls that report BSY after each DR write.
    pub fn set_busy_polls(&self, unit: Unit, polls: usize) {
        self.state.borrow_mut().units[unit.index()].busy_polls = polls;
    }

    pub fn set_stuck_busy(&self, unit: Unit, stuck: bool) {
        self.state.borrow_mut().units[unit.index()].stuck_busy = stuck;
    }

    /// Queue words in the hardware RX FIFO.
    pub fn receive(&self, unit: Unit, words: &[Word]) {
        self.state.borrow_mut().units[unit.index()]
            .rx_fifo
            .extend_from_slice(words);
    }

    pub fn rx_fifo_len(&self, unit: Unit) -> usize {
        self.state.borrow().units[unit.index()].rx_fifo.len()
    }

    /// Assert interrupt sources in MIS.
    pub fn raise(&self, unit: Unit, bits: u32) {
        self.state.borrow_mut().units[unit.index()].regs[slot(Register::Mis)] |= bits;
    }
}

impl RegisterBlock for MockRegisters {
    fn read(&self, unit: Unit, register: Register) -> u32 {
        let mut state = self.state.borrow_mut();
        let model = &mut state.units[unit.index()];
        match register {
            Register::Sr => {
                let mut sr = 0;
                if model.tx_space > 0 {
                    sr |= reg::SR_TNF;
                }
                if !model.rx_fifo.is_empty() {
                    sr |= reg::SR_RNE;
                }
                if model.stuck_busy {
                    sr |= reg::SR_BSY;
                } else if model.busy_remaining > 0 {
                    model.busy_remaining -= 1;
                    sr |= reg::SR_BSY;
                }
                sr
            }
            Register::Dr => {
                if model.rx_fifo.is_empty() {
                    0
                } else {
                    model.rx_fifo.remove(0) as u32
                }
            }
            _ => model.regs[slot(register)],
        }
    }

    fn write(&self, unit: Unit, register: Register, value: u32) {
        let mut state = self.state.borrow_mut();
        state.log.push((unit, register, value));
        let model = &mut state.units[unit.index()];
        match register {
            Register::Dr => {
                model.transmitted.push(value as Word);
                model.tx_space = model.tx_space.saturating_sub(1);
                model.busy_remaining = model.busy_polls;
            }
            Register::Icr => {
                model.regs[slot(Register::Mis)] &= !value;
            }
            _ => model.regs[slot(register)] = value,
        }
    }
}
