#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId(pub u64);

#[derive(Debug, Default)]
pub struct TaskSeq {
    next: u64,
}

impl TaskSeq {
    pub fn next_id(&mut self) -> TaskId {
        let id = TaskId(self.next);
        self.next = self.next.wrapping_add(1);
        id
    }
}

/// Backend operations whose results are matched against the task that started them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskKind {
    SessionCheck,
    Login,
    Register,
    CreatePost,
}

/// Task lifecycle state (stored in AppState, mutated only by the reducer).
#[derive(Debug, Default, Clone)]
pub struct TaskState {
    pub active: Option<TaskId>,
}

impl TaskState {
    pub fn is_running(&self) -> bool {
        self.active.is_some()
    }

    pub fn start(&mut self, id: TaskId) {
        self.active = Some(id);
    }

    /// Clears the task if `id` is the active one. A `false` return means the
    /// result is stale and must not touch state tied to this task.
    pub fn finish_if_active(&mut self, id: TaskId) -> bool {
        let ok = self.active == Some(id);
        if ok {
            self.active = None;
        }
        ok
    }

    pub fn clear(&mut self) {
        self.active = None;
    }
}

#[derive(Debug, Default, Clone)]
pub struct Tasks {
    pub session_check: TaskState,
    pub login: TaskState,
    pub register: TaskState,
    pub create_post: TaskState,
}

impl Tasks {
    pub fn state(&self, kind: TaskKind) -> &TaskState {
        match kind {
            TaskKind::SessionCheck => &self.session_check,
            TaskKind::Login => &self.login,
            TaskKind::Register => &self.register,
            TaskKind::CreatePost => &self.create_post,
        }
    }

    pub fn state_mut(&mut self, kind: TaskKind) -> &mut TaskState {
        match kind {
            TaskKind::SessionCheck => &mut self.session_check,
            TaskKind::Login => &mut self.login,
            TaskKind::Register => &mut self.register,
            TaskKind::CreatePost => &mut self.create_post,
        }
    }

    pub fn is_any_running(&self) -> bool {
        self.session_check.is_running()
            || self.login.is_running()
            || self.register.is_running()
            || self.create_post.is_running()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finish_only_matches_active_task() {
        let mut seq = TaskSeq::default();
        let first = seq.next_id();
        let second = seq.next_id();
        assert_ne!(first, second);

        let mut tasks = Tasks::default();
        tasks.state_mut(TaskKind::Login).start(second);
        assert!(tasks.is_any_running());

        assert!(!tasks.state_mut(TaskKind::Login).finish_if_active(first));
        assert!(tasks.state(TaskKind::Login).is_running());
        assert!(tasks.state_mut(TaskKind::Login).finish_if_active(second));
        assert!(!tasks.is_any_running());
    }

    #[test]
    fn test_cleared_task_rejects_late_result() {
        let mut state = TaskState::default();
        state.start(TaskId(7));
        state.clear();
        assert!(!state.finish_if_active(TaskId(7)));
    }
}
