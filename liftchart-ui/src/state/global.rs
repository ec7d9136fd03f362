//! Global Application State
//!
//! Reactive state management using Leptos signals. The dataset is loaded
//! once; every interaction replaces the view state, and the scene is
//! recomputed from (dataset, view, config).

use leptos::*;
use std::rc::Rc;

use liftchart::chart::{
    render, BrushGesture, BrushSelection, ChartConfig, ChartScene, TimeScale, TooltipState,
    ViewState,
};
use liftchart::dataset::{Dataset, Record};
use liftchart::query::Selection;

/// Global application state provided to all components
#[derive(Clone)]
pub struct GlobalState {
    /// Layout and colors; fixed for the page's lifetime
    pub config: Rc<ChartConfig>,
    /// The loaded dataset, `None` until the fetch completes
    pub dataset: RwSignal<Option<Rc<Dataset>>>,
    /// Selectors and time domain
    pub view: RwSignal<ViewState>,
    /// Drag in progress on the overview strip
    pub gesture: RwSignal<Option<BrushGesture>>,
    pub tooltip: RwSignal<TooltipState>,
    /// Global loading state
    pub loading: RwSignal<bool>,
    /// Scene for the current dataset and view
    pub scene: Memo<Option<ChartScene>>,
    /// Federation selector options: name and record count
    pub federations: Memo<Vec<(String, usize)>>,
}

/// Provide global state to the component tree
pub fn provide_global_state() {
    provide_context(GlobalState::new(ChartConfig::default()));
}

/// Recomputed whenever the dataset arrives or the view changes
fn scene_memo(
    dataset: RwSignal<Option<Rc<Dataset>>>,
    view: RwSignal<ViewState>,
    config: Rc<ChartConfig>,
) -> Memo<Option<ChartScene>> {
    create_memo(move |_| {
        let dataset = dataset.get()?;
        let scene = view.with(|view| render(&dataset, view, &config));
        web_sys::console::log_1(
            &format!(
                "Rendering: {} male records, {} female records",
                scene.male_count, scene.female_count
            )
            .into(),
        );
        Some(scene)
    })
}

fn federations_memo(
    dataset: RwSignal<Option<Rc<Dataset>>>,
    limit: usize,
) -> Memo<Vec<(String, usize)>> {
    create_memo(move |_| {
        dataset
            .get()
            .map(|d| d.top_federations(limit))
            .unwrap_or_default()
    })
}

/// Current global state; panics outside the component tree
pub fn use_global_state() -> GlobalState {
    use_context::<GlobalState>().expect("GlobalState not found")
}

impl GlobalState {
    /// Fresh state: no dataset yet, default view, loading
    pub fn new(config: ChartConfig) -> Self {
        let config = Rc::new(config);
        let dataset = create_rw_signal(None);
        let view = create_rw_signal(ViewState::default());

        Self {
            scene: scene_memo(dataset, view, Rc::clone(&config)),
            federations: federations_memo(dataset, config.top_federations),
            config,
            dataset,
            view,
            gesture: create_rw_signal(None),
            tooltip: create_rw_signal(TooltipState::Hidden),
            loading: create_rw_signal(true),
        }
    }

    /// Change a selector; the time domain resets to the full range
    pub fn update_selection(&self, change: impl FnOnce(Selection) -> Selection) {
        self.tooltip.set(TooltipState::Hidden);
        self.view.update(|view| {
            let current = std::mem::take(view);
            let selection = change(current.selection.clone());
            *view = current.with_selection(selection);
        });
    }

    /// Scale of the overview strip, shared by drawing and hit testing
    pub fn strip_scale(&self) -> TimeScale {
        TimeScale::new(self.config.full_window(), (0.0, self.config.brush_inner_width()))
    }

    pub fn begin_brush(&self, x: f64) {
        self.gesture.set(Some(BrushGesture::begin(x)));
    }

    pub fn drag_brush(&self, x: f64) {
        self.gesture.update(|gesture| {
            if let Some(g) = gesture.take() {
                *gesture = Some(g.update(x));
            }
        });
    }

    /// Finish the drag and apply it as the new time domain
    pub fn end_brush(&self) {
        let Some(gesture) = self.gesture.get_untracked() else {
            return;
        };
        self.gesture.set(None);

        let selection: Option<BrushSelection> = gesture.finish(self.config.brush_inner_width());
        let strip = self.strip_scale();
        self.view.update(|view| {
            *view = std::mem::take(view).with_brush(selection, &strip);
        });
    }

    /// Back to the full configured year range
    pub fn reset_domain(&self) {
        self.gesture.set(None);
        self.view.update(|view| *view = std::mem::take(view).reset());
    }

    pub fn show_tooltip(&self, record: &Record, page_x: f64, page_y: f64) {
        self.tooltip.set(TooltipState::show(record, page_x, page_y));
    }

    pub fn move_tooltip(&self, page_x: f64, page_y: f64) {
        self.tooltip
            .update(|t| *t = std::mem::take(t).move_to(page_x, page_y));
    }

    pub fn hide_tooltip(&self) {
        self.tooltip.set(TooltipState::Hidden);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use liftchart::chart::TimeDomain;
    use liftchart::dataset::Tested;

    #[test]
    fn test_brush_then_selection_change() {
        let runtime = create_runtime();
        let state = GlobalState::new(ChartConfig::default());

        state.begin_brush(100.0);
        state.drag_brush(300.0);
        state.end_brush();

        assert!(state.gesture.get_untracked().is_none());
        assert!(state.view.get_untracked().domain.is_zoomed());

        state.update_selection(|s| s.tested(Tested::Yes));
        let view = state.view.get_untracked();
        assert_eq!(view.selection.tested, Tested::Yes);
        assert_eq!(view.domain, TimeDomain::Full);

        runtime.dispose();
    }

    #[test]
    fn test_click_keeps_domain_and_reset_restores_full_range() {
        let runtime = create_runtime();
        let state = GlobalState::new(ChartConfig::default());

        state.begin_brush(200.0);
        state.end_brush();
        assert_eq!(state.view.get_untracked().domain, TimeDomain::Full);

        state.begin_brush(200.0);
        state.drag_brush(500.0);
        state.end_brush();
        assert!(state.view.get_untracked().domain.is_zoomed());

        state.reset_domain();
        let window = state.view.get_untracked().window(&state.config);
        assert_eq!(window, state.config.full_window());

        runtime.dispose();
    }

    #[test]
    fn test_tooltip_follows_pointer() {
        let runtime = create_runtime();
        let state = GlobalState::new(ChartConfig::default());
        let record = Record::new(2000, liftchart::dataset::Sex::Male, Some(210.0));

        state.show_tooltip(&record, 100.0, 50.0);
        assert!(state.tooltip.get_untracked().is_visible());

        state.hide_tooltip();
        assert!(!state.tooltip.get_untracked().is_visible());

        runtime.dispose();
    }
}
