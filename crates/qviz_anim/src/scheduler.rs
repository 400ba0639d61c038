//! Cooperative animation scheduler
//!
//! Gantree: L3_Anim → Scheduler
//!
//! Holds the live animation tasks, at most one per owner key, and polls each
//! once per frame. A task is a resumable state machine: `poll` runs one
//! step and yields. Cancelling removes the task from the set and runs its
//! `stop` hook against the target, so no periodic work outlives its owner.

use crate::clock::Frame;
use qviz_core::{QvizError, QvizResult};
use std::collections::BTreeMap;
use std::fmt;

/// Unique task handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(u64);

impl TaskId {
    /// Raw value
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "task#{}", self.0)
    }
}

/// Result of one poll
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskStatus {
    /// Keep polling next frame
    Running,
    /// Done; the scheduler calls `stop` and drops the task
    Finished,
}

/// Per-frame animation step
/// Gantree: AnimationTask // 애니메이션 태스크
pub trait AnimationTask<T> {
    /// Short name for logs
    fn name(&self) -> &'static str;

    /// Advance one frame
    fn poll(&mut self, target: &mut T, frame: &Frame) -> TaskStatus;

    /// Cleanup hook; must be idempotent
    fn stop(&mut self, _target: &mut T) {}
}

/// Lookup from owner key to animated target
pub trait TargetStore<K, T> {
    /// Mutable target for `key`, `None` if it no longer exists
    fn target_mut(&mut self, key: &K) -> Option<&mut T>;
}

impl<T> TargetStore<usize, T> for Vec<T> {
    fn target_mut(&mut self, key: &usize) -> Option<&mut T> {
        self.get_mut(*key)
    }
}

impl<T> TargetStore<usize, T> for [T] {
    fn target_mut(&mut self, key: &usize) -> Option<&mut T> {
        self.get_mut(*key)
    }
}

impl<K: Ord, T> TargetStore<K, T> for BTreeMap<K, T> {
    fn target_mut(&mut self, key: &K) -> Option<&mut T> {
        self.get_mut(key)
    }
}

struct Scheduled<T> {
    id: TaskId,
    task: Box<dyn AnimationTask<T>>,
    polls: u64,
}

/// Live task set keyed by owner
/// Gantree: Scheduler // 협력 스케줄러
pub struct Scheduler<K, T> {
    label: &'static str,
    tasks: BTreeMap<K, Scheduled<T>>,
    next_id: u64,
}

impl<K: Ord + Copy + fmt::Debug, T> Scheduler<K, T> {
    // ========================================================================
    // Constructors
    // ========================================================================

    /// Create empty scheduler; `label` names owners in logs and errors
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            tasks: BTreeMap::new(),
            next_id: 1,
        }
    }

    // ========================================================================
    // Task Lifecycle
    // ========================================================================

    /// Register a task for `owner`
    /// Gantree: spawn(owner,task) -> Result<TaskId> // 태스크 등록
    ///
    /// Fails with `AnimationTaskConflict` if the owner already has one; callers
    /// cancel first.
    pub fn spawn(&mut self, owner: K, task: Box<dyn AnimationTask<T>>) -> QvizResult<TaskId> {
        if self.tasks.contains_key(&owner) {
            return Err(QvizError::AnimationTaskConflict {
                owner: format!("{} {:?}", self.label, owner),
            });
        }

        let id = TaskId(self.next_id);
        self.next_id += 1;
        log::trace!("{} {:?}: start {} ({})", self.label, owner, task.name(), id);
        self.tasks.insert(owner, Scheduled { id, task, polls: 0 });
        Ok(id)
    }

    /// Cancel the owner's task, running its stop hook
    /// Gantree: cancel(owner,target) -> bool // 태스크 취소
    pub fn cancel(&mut self, owner: &K, target: &mut T) -> bool {
        match self.tasks.remove(owner) {
            Some(mut scheduled) => {
                scheduled.task.stop(target);
                log::trace!(
                    "{} {:?}: cancel {} after {} polls",
                    self.label,
                    owner,
                    scheduled.task.name(),
                    scheduled.polls
                );
                true
            }
            None => false,
        }
    }

    /// Drop the owner's task when the target is already gone
    pub fn cancel_detached(&mut self, owner: &K) -> bool {
        self.tasks.remove(owner).is_some()
    }

    /// Cancel everything; returns the number cancelled
    pub fn cancel_all<S>(&mut self, targets: &mut S) -> usize
    where
        S: TargetStore<K, T> + ?Sized,
    {
        let count = self.tasks.len();
        for (owner, mut scheduled) in std::mem::take(&mut self.tasks) {
            if let Some(target) = targets.target_mut(&owner) {
                scheduled.task.stop(target);
            }
        }
        count
    }

    /// Poll every live task once
    /// Gantree: tick(frame,targets) -> usize // 프레임 진행
    ///
    /// Finished tasks and tasks whose target vanished are removed. Returns the
    /// number removed.
    pub fn tick<S>(&mut self, frame: &Frame, targets: &mut S) -> usize
    where
        S: TargetStore<K, T> + ?Sized,
    {
        let mut done = Vec::new();

        for (owner, scheduled) in self.tasks.iter_mut() {
            match targets.target_mut(owner) {
                Some(target) => {
                    scheduled.polls += 1;
                    if scheduled.task.poll(target, frame) == TaskStatus::Finished {
                        scheduled.task.stop(target);
                        done.push(*owner);
                    }
                }
                None => {
                    log::warn!(
                        "{} {:?}: target gone, dropping {}",
                        self.label,
                        owner,
                        scheduled.task.name()
                    );
                    done.push(*owner);
                }
            }
        }

        for owner in &done {
            self.tasks.remove(owner);
        }
        done.len()
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Owner has a live task
    pub fn is_active(&self, owner: &K) -> bool {
        self.tasks.contains_key(owner)
    }

    /// Handle of the owner's task
    pub fn task_id(&self, owner: &K) -> Option<TaskId> {
        self.tasks.get(owner).map(|s| s.id)
    }

    /// Name of the owner's task
    pub fn task_name(&self, owner: &K) -> Option<&'static str> {
        self.tasks.get(owner).map(|s| s.task.name())
    }

    /// Owners with live tasks
    pub fn owners(&self) -> impl Iterator<Item = &K> {
        self.tasks.keys()
    }

    /// Number of live tasks
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// No live tasks
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

impl<K, T> fmt::Debug for Scheduler<K, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scheduler")
            .field("label", &self.label)
            .field("tasks", &self.tasks.len())
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================
