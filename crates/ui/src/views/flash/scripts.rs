/// Restart a one-shot CSS animation by removing the class, forcing a
/// reflow and adding it back.
pub(super) fn restart_animation_script(element_id: &str, class: &str) -> String {
    format!(
        r"(function() {{
            const el = document.getElementById({element_id:?});
            if (!el) return;
            el.classList.remove({class:?});
            void el.offsetWidth;
            el.classList.add({class:?});
        }})();"
    )
}

pub(super) fn focus_script(element_id: &str) -> String {
    format!("document.getElementById({element_id:?})?.focus();")
}
