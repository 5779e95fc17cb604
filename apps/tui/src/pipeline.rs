//! The analysis job: plays the status steps and fetches the result.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::domain::AnalysisPayload;
use crate::error::AnalysisError;
use crate::source::{AnalysisSource, Upload};

/// When the fetch runs relative to the status steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchMode {
    /// Play every step, then fetch.
    Sequential,
    /// Fetch while the steps play.
    Concurrent,
}

impl FetchMode {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sequential => "sequential",
            Self::Concurrent => "concurrent",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "sequential" => Some(Self::Sequential),
            "concurrent" => Some(Self::Concurrent),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AnalysisPlan {
    pub steps: usize,
    pub step_delay: Duration,
    pub mode: FetchMode,
}

#[derive(Debug)]
pub enum JobEvent {
    Step {
        job: u64,
        index: usize,
    },
    Finished {
        job: u64,
        result: Result<AnalysisPayload, AnalysisError>,
    },
}

impl JobEvent {
    pub const fn job(&self) -> u64 {
        match self {
            Self::Step { job, .. } | Self::Finished { job, .. } => *job,
        }
    }
}

/// Owns a running analysis task. Dropping the handle aborts the task.
#[derive(Debug)]
pub struct JobHandle {
    pub id: u64,
    task: JoinHandle<()>,
}

impl JobHandle {
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for JobHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Starts analysis job `id`. Events arrive on `events` in order: one `Step`
/// per step, then exactly one `Finished`.
pub fn spawn_analysis(
    id: u64,
    source: Arc<dyn AnalysisSource>,
    upload: Upload,
    plan: AnalysisPlan,
    events: UnboundedSender<JobEvent>,
) -> JobHandle {
    let task = tokio::spawn(async move {
        info!(
            "analysis job {id} started: source={}, file={}, mode={}",
            source.name(),
            upload.file_name,
            plan.mode.as_str()
        );

        let result = match plan.mode {
            FetchMode::Sequential => {
                play_steps(id, &plan, &events).await;
                source.analyze(&upload).await
            }
            FetchMode::Concurrent => {
                let (_, result) =
                    tokio::join!(play_steps(id, &plan, &events), source.analyze(&upload));
                result
            }
        };

        match &result {
            Ok(_) => info!("analysis job {id} finished"),
            Err(e) => warn!("analysis job {id} failed: {e}"),
        }

        if events.send(JobEvent::Finished { job: id, result }).is_err() {
            debug!("analysis job {id}: receiver gone, result dropped");
        }
    });

    JobHandle { id, task }
}

async fn play_steps(job: u64, plan: &AnalysisPlan, events: &UnboundedSender<JobEvent>) {
    for index in 0..plan.steps {
        if events.send(JobEvent::Step { job, index }).is_err() {
            return;
        }
        tokio::time::sleep(plan.step_delay).await;
    }
}

pub fn channel() -> (UnboundedSender<JobEvent>, UnboundedReceiver<JobEvent>) {
    mpsc::unbounded_channel()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::FixtureSource;
    use async_trait::async_trait;
    use std::path::PathBuf;

    struct Failing;

    #[async_trait]
    impl AnalysisSource for Failing {
        async fn analyze(&self, _upload: &Upload) -> Result<AnalysisPayload, AnalysisError> {
            Err(AnalysisError::status(500, "Failed to process image"))
        }

        fn name(&self) -> &'static str {
            "failing"
        }
    }

    fn upload() -> Upload {
        Upload::from_bytes(PathBuf::from("scene.png"), Vec::new())
    }

    fn plan(mode: FetchMode) -> AnalysisPlan {
        AnalysisPlan {
            steps: 3,
            step_delay: Duration::ZERO,
            mode,
        }
    }

    async fn collect(mut rx: UnboundedReceiver<JobEvent>) -> Vec<JobEvent> {
        let mut events = Vec::new();
        while let Some(event) = rx.recv().await {
            let done = matches!(event, JobEvent::Finished { .. });
            events.push(event);
            if done {
                break;
            }
        }
        events
    }

    #[tokio::test]
    async fn steps_precede_the_result_in_both_modes() {
        for mode in [FetchMode::Sequential, FetchMode::Concurrent] {
            let (tx, rx) = channel();
            let _job = spawn_analysis(9, Arc::new(FixtureSource), upload(), plan(mode), tx);
            let events = collect(rx).await;

            assert_eq!(events.len(), 4, "{mode:?}");
            for (i, event) in events.iter().take(3).enumerate() {
                assert!(matches!(event, JobEvent::Step { job: 9, index } if *index == i));
            }
            assert!(matches!(
                events.last(),
                Some(JobEvent::Finished { job: 9, result: Ok(_) })
            ));
        }
    }

    #[tokio::test]
    async fn failures_are_delivered_as_events() {
        let (tx, rx) = channel();
        let _job = spawn_analysis(
            1,
            Arc::new(Failing),
            upload(),
            plan(FetchMode::Concurrent),
            tx,
        );
        let events = collect(rx).await;
        match events.last() {
            Some(JobEvent::Finished { result: Err(e), .. }) => {
                assert_eq!(e.to_string(), "Failed to process image");
            }
            other => panic!("unexpected final event: {other:?}"),
        }
    }

    #[tokio::test]
    async fn dropping_the_handle_aborts_the_job() {
        let (tx, mut rx) = channel();
        let slow = AnalysisPlan {
            steps: 3,
            step_delay: Duration::from_secs(60),
            mode: FetchMode::Sequential,
        };
        let job = spawn_analysis(2, Arc::new(FixtureSource), upload(), slow, tx);
        assert!(matches!(rx.recv().await, Some(JobEvent::Step { index: 0, .. })));
        drop(job);
        // The aborted task drops its sender, closing the channel.
        assert!(rx.recv().await.is_none());
    }
}
