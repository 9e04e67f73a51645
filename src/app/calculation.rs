//! Arithmetic use case.

use std::sync::Arc;

use crate::domain::{Calculation, DomainError, Operation};
use crate::ports::inbound::CalculationUseCase;
use crate::ports::outbound::Logger;

pub struct CalculationService {
    logger: Arc<dyn Logger>,
}

impl CalculationService {
    pub fn new(logger: Arc<dyn Logger>) -> Self {
        Self { logger }
    }
}

impl CalculationUseCase for CalculationService {
    fn calculate(&self, operation: Operation, a: f64, b: f64) -> Result<Calculation, DomainError> {
        self.logger.info(&format!(
            "Performing calculation: {} {} {}",
            a,
            operation.name(),
            b
        ));

        match Calculation::perform(operation, a, b) {
            Ok(calculation) => {
                self.logger
                    .info(&format!("Calculation result: {}", calculation.result()));
                Ok(calculation)
            }
            Err(e) => {
                self.logger.error("Calculation rejected", Some(&e));
                Err(e)
            }
        }
    }
}
