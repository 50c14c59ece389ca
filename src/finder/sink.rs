use crate::candidate::Candidate;
use log::warn;
use std::sync::mpsc::Sender;

/// Receiver of finalized candidates.
pub trait CandidateSink {
    fn deliver(&mut self, candidate: Candidate);
}

impl CandidateSink for Vec<Candidate> {
    fn deliver(&mut self, candidate: Candidate) {
        self.push(candidate);
    }
}

impl CandidateSink for Sender<Candidate> {
    fn deliver(&mut self, candidate: Candidate) {
        if let Err(err) = self.send(candidate) {
            warn!(
                "CandidateSink::deliver receiver gone, dropping candidate {}",
                err.0.id.0
            );
        }
    }
}

impl<S: CandidateSink + ?Sized> CandidateSink for &mut S {
    fn deliver(&mut self, candidate: Candidate) {
        (**self).deliver(candidate);
    }
}

/// Adapter turning a closure into a sink.
pub struct FnSink<F>(pub F);

impl<F: FnMut(Candidate)> CandidateSink for FnSink<F> {
    fn deliver(&mut self, candidate: Candidate) {
        (self.0)(candidate);
    }
}
