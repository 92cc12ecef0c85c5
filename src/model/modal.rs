//! Modal stack for overlays drawn above the mod list

/// An overlay that can be displayed on top of the mod list
#[derive(Debug, Clone, PartialEq)]
pub enum Modal {
    /// Quit confirmation, warns when the order has not been saved
    QuitConfirm { unsaved: bool },
    /// Keyboard and mouse reference
    Help { scroll_offset: usize },
}

/// A stack of modal overlays
///
/// Only the top modal receives input events.
#[derive(Debug, Default)]
pub struct ModalStack {
    stack: Vec<Modal>,
}

impl ModalStack {
    pub fn new() -> Self {
        Self { stack: Vec::new() }
    }

    pub fn push(&mut self, modal: Modal) {
        self.stack.push(modal);
    }

    pub fn pop(&mut self) -> Option<Modal> {
        self.stack.pop()
    }

    pub fn top(&self) -> Option<&Modal> {
        self.stack.last()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    /// Push the modal unless the same kind is already on top
    pub fn toggle(&mut self, modal: Modal) {
        let same_kind = self
            .top()
            .is_some_and(|top| std::mem::discriminant(top) == std::mem::discriminant(&modal));
        if same_kind {
            self.stack.pop();
        } else {
            self.stack.push(modal);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modal_stack_push_pop() {
        let mut stack = ModalStack::new();
        assert!(stack.top().is_none());

        stack.push(Modal::Help { scroll_offset: 0 });
        stack.push(Modal::QuitConfirm { unsaved: true });

        assert_eq!(stack.pop(), Some(Modal::QuitConfirm { unsaved: true }));
        assert_eq!(stack.pop(), Some(Modal::Help { scroll_offset: 0 }));
        assert!(stack.is_empty());
    }

    #[test]
    fn test_modal_stack_toggle() {
        let mut stack = ModalStack::new();
        stack.toggle(Modal::Help { scroll_offset: 0 });
        assert_eq!(stack.top(), Some(&Modal::Help { scroll_offset: 0 }));

        stack.toggle(Modal::Help { scroll_offset: 3 });
        assert!(stack.is_empty());
    }
}
