//! Fixed-timestep runner
//!
//! Turns variable frame times into whole `SIM_DT` steps.

use crate::consts::*;

#[derive(Debug, Clone)]
pub struct Runner {
    accumulator: f32,
    running: bool,
}

impl Default for Runner {
    fn default() -> Self {
        Self::new()
    }
}

impl Runner {
    /// Stopped runner
    pub fn new() -> Self {
        Self {
            accumulator: 0.0,
            running: false,
        }
    }

    pub fn start(&mut self) {
        self.running = true;
    }

    /// Stop stepping and drop any banked time
    pub fn stop(&mut self) {
        self.running = false;
        self.accumulator = 0.0;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Bank a frame's elapsed seconds and return how many steps to run now
    pub fn advance(&mut self, frame_dt: f32) -> u32 {
        if !self.running {
            return 0;
        }
        self.accumulator += frame_dt.clamp(0.0, MAX_FRAME_DT);

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            self.accumulator -= SIM_DT;
            substeps += 1;
        }
        // Behind by more than the substep budget: drop the backlog
        if substeps == MAX_SUBSTEPS {
            self.accumulator = self.accumulator.min(SIM_DT);
        }
        substeps
    }
}
