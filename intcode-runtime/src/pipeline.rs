//! Chained machines
//!
//! Every stage is an independent [`Machine`] built from the same program and
//! primed with its phase setting. A pipeline passes one signal through the
//! stages once; a feedback loop wires the last stage back to the first and
//! keeps circulating until a stage halts.

use intcode_spec::{Program, Word};
use thiserror::Error;

use crate::error::RuntimeError;
use crate::state::Status;
use crate::vm::Machine;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Runtime(#[from] RuntimeError),

    #[error("No phase settings given")]
    NoStages,

    #[error("Stage {stage} produced no output")]
    NoOutput { stage: usize },

    #[error("Stage {stage} is waiting for input that will never arrive")]
    Starved { stage: usize },
}

pub type Result<T> = std::result::Result<T, PipelineError>;

/// How the stages are wired
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Topology {
    /// One pass from the first stage to the last
    #[default]
    Pipeline,
    /// Last stage feeds the first until a stage halts
    Feedback,
}

impl Topology {
    pub fn run(self, program: &Program, phases: &[Word], seed: Word) -> Result<Word> {
        match self {
            Topology::Pipeline => pipeline(program, phases, seed),
            Topology::Feedback => feedback_loop(program, phases, seed),
        }
    }
}

fn stages(program: &Program, phases: &[Word]) -> Result<Vec<Machine>> {
    if phases.is_empty() {
        return Err(PipelineError::NoStages);
    }
    Ok(phases
        .iter()
        .map(|&phase| {
            let mut machine = Machine::new(program);
            machine.push_input(phase);
            machine
        })
        .collect())
}

/// Pass `seed` through one stage per phase and return the last stage's output
pub fn pipeline(program: &Program, phases: &[Word], seed: Word) -> Result<Word> {
    let mut signal = seed;
    for (stage, mut machine) in stages(program, phases)?.into_iter().enumerate() {
        machine.push_input(signal);
        machine.run_to_output()?;
        signal = machine
            .pop_output()
            .map_err(|_| PipelineError::NoOutput { stage })?;
        tracing::debug!(stage, signal, "stage output");
    }
    Ok(signal)
}

/// Circulate `seed` around the stages until one halts; the result is the last
/// signal produced by the final stage
pub fn feedback_loop(program: &Program, phases: &[Word], seed: Word) -> Result<Word> {
    let mut machines = stages(program, phases)?;
    let last = machines.len() - 1;
    machines[0].push_input(seed);

    let mut result = None;
    loop {
        for stage in 0..machines.len() {
            match machines[stage].run_to_output()? {
                Status::Halted => {
                    return result.ok_or(PipelineError::NoOutput { stage: last });
                }
                Status::PendingInput => return Err(PipelineError::Starved { stage }),
                _ => {}
            }

            let signal = machines[stage].pop_output()?;
            tracing::debug!(stage, signal, "stage output");
            if stage == last {
                result = Some(signal);
            }
            let n = machines.len();
            machines[(stage + 1) % n].push_input(signal);
        }
    }
}

/// Best signal found by [`max_thrust`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Thrust {
    pub signal: Word,
    pub phases: Vec<Word>,
}

/// Try every ordering of `phases` and keep the one with the largest signal
pub fn max_thrust(program: &Program, phases: &[Word], topology: Topology) -> Result<Thrust> {
    let mut best: Option<Thrust> = None;
    for order in permutations(phases) {
        let signal = topology.run(program, &order, 0)?;
        if best.as_ref().map_or(true, |b| signal > b.signal) {
            best = Some(Thrust { signal, phases: order });
        }
    }
    best.ok_or(PipelineError::NoStages)
}

/// All orderings of `items` (Heap's algorithm)
pub fn permutations(items: &[Word]) -> Vec<Vec<Word>> {
    fn generate(k: usize, items: &mut Vec<Word>, out: &mut Vec<Vec<Word>>) {
        if k <= 1 {
            out.push(items.clone());
            return;
        }
        generate(k - 1, items, out);
        for i in 0..k - 1 {
            if k % 2 == 0 {
                items.swap(i, k - 1);
            } else {
                items.swap(0, k - 1);
            }
            generate(k - 1, items, out);
        }
    }

    if items.is_empty() {
        return Vec::new();
    }
    let mut out = Vec::new();
    generate(items.len(), &mut items.to_vec(), &mut out);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn program(text: &str) -> Program {
        text.split(',').map(|w| w.parse::<Word>().unwrap()).collect()
    }

    #[test]
    fn test_pipeline_example() {
        let p = program("3,15,3,16,1002,16,10,16,1,16,15,15,4,15,99,0,0");
        assert_eq!(pipeline(&p, &[4, 3, 2, 1, 0], 0).unwrap(), 43210);
    }

    #[test]
    fn test_feedback_example() {
        let p = program(
            "3,26,1001,26,-4,26,3,27,1002,27,2,27,1,27,26,27,4,27,1001,28,-1,28,1005,28,6,99,0,0,5",
        );
        assert_eq!(feedback_loop(&p, &[9, 8, 7, 6, 5], 0).unwrap(), 139629729);
    }

    #[test]
    fn test_no_stages() {
        let p = program("99");
        assert_eq!(pipeline(&p, &[], 0).unwrap_err(), PipelineError::NoStages);
        assert_eq!(feedback_loop(&p, &[], 0).unwrap_err(), PipelineError::NoStages);
    }

    #[test]
    fn test_stage_without_output() {
        // Reads phase and signal, then halts silently
        let p = program("3,0,3,0,99");
        assert_eq!(
            pipeline(&p, &[0, 1], 5).unwrap_err(),
            PipelineError::NoOutput { stage: 0 }
        );
    }

    #[test]
    fn test_starved_stage() {
        // Wants three inputs before producing anything
        let p = program("3,0,3,0,3,0,4,0,99");
        assert_eq!(
            feedback_loop(&p, &[1, 2], 0).unwrap_err(),
            PipelineError::Starved { stage: 0 }
        );
    }

    #[test]
    fn test_permutations() {
        let perms = permutations(&[0, 1, 2, 3]);
        assert_eq!(perms.len(), 24);
        let unique: HashSet<Vec<Word>> = perms.into_iter().collect();
        assert_eq!(unique.len(), 24);
        assert!(permutations(&[]).is_empty());
        assert_eq!(permutations(&[7]), vec![vec![7]]);
    }

    #[test]
    fn test_max_thrust() {
        let p = program("3,15,3,16,1002,16,10,16,1,16,15,15,4,15,99,0,0");
        let best = max_thrust(&p, &[0, 1, 2, 3, 4], Topology::Pipeline).unwrap();
        assert_eq!(best.signal, 43210);
        assert_eq!(best.phases, vec![4, 3, 2, 1, 0]);
    }
}
