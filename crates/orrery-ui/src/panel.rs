//! Flat panel over the body hierarchy: selection plus clamped field edits.

use orrery_scene::OrbitingBody;

/// An editable body field.
///
/// Orbit-shaping fields (everything but scale and color) are hidden for
/// root bodies: a root has no parent to orbit, so radius, inclination and
/// velocity have no visible effect there.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Scale,
    Radius,
    Inclination,
    Velocity,
    ColorR,
    ColorG,
    ColorB,
}

impl Field {
    /// (min, max, step) for the panel's own edits. Values already in the
    /// tree outside these ranges are left alone until the field is edited.
    fn range(self) -> (f32, f32, f32) {
        match self {
            Field::Scale => (0.5, 10.0, 0.1),
            Field::Radius => (0.1, 10.0, 0.1),
            Field::Inclination => (0.0, std::f32::consts::PI, 0.01),
            Field::Velocity => (-1.0, 1.0, 0.05),
            Field::ColorR | Field::ColorG | Field::ColorB => (0.0, 1.0, 0.05),
        }
    }

    /// Label shown next to the value.
    pub fn label(self) -> &'static str {
        match self {
            Field::Scale => "scale",
            Field::Radius => "orbital radius",
            Field::Inclination => "inclination",
            Field::Velocity => "angular velocity",
            Field::ColorR => "color r",
            Field::ColorG => "color g",
            Field::ColorB => "color b",
        }
    }
}

/// One row of the panel: a body's name, its path into the tree, and how
/// deep it sits (for indentation when the panel is printed).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelEntry {
    /// Body display name, copied at build time.
    pub name: String,
    /// Child indices from the root down to this body. Empty for the root.
    pub path: Vec<usize>,
    /// Nesting depth, equal to `path.len()`.
    pub depth: usize,
}

impl PanelEntry {
    /// Whether this entry is a root body (hides the orbit-shaping fields).
    pub fn is_root(&self) -> bool {
        self.path.is_empty()
    }
}

/// The panel model: pre-order entries plus a selection cursor.
///
/// The entry list snapshots the tree *shape* only; field values are read
/// and written through the live tree on every operation, so edits from
/// elsewhere never go stale here. Rebuild the panel if the tree shape
/// changes.
#[derive(Debug, Clone)]
pub struct ParameterPanel {
    entries: Vec<PanelEntry>,
    selected: usize,
}

impl ParameterPanel {
    /// Build the panel from the current tree shape, selecting the root.
    pub fn new(root: &OrbitingBody) -> Self {
        let mut entries = Vec::with_capacity(root.count_inclusive());
        collect_entries(root, &mut Vec::new(), &mut entries);
        Self {
            entries,
            selected: 0,
        }
    }

    /// All rows, in pre-order.
    pub fn entries(&self) -> &[PanelEntry] {
        &self.entries
    }

    /// The currently selected row.
    pub fn selected(&self) -> &PanelEntry {
        &self.entries[self.selected]
    }

    /// Index of the selected row.
    pub fn selected_index(&self) -> usize {
        self.selected
    }

    /// Move the cursor down, wrapping past the last entry.
    pub fn select_next(&mut self) {
        self.selected = (self.selected + 1) % self.entries.len();
    }

    /// Move the cursor up, wrapping past the first entry.
    pub fn select_prev(&mut self) {
        self.selected = (self.selected + self.entries.len() - 1) % self.entries.len();
    }

    /// The fields editable on the selected body.
    pub fn fields(&self) -> &'static [Field] {
        if self.selected().is_root() {
            &[
                Field::Scale,
                Field::ColorR,
                Field::ColorG,
                Field::ColorB,
            ]
        } else {
            &[
                Field::Scale,
                Field::Radius,
                Field::Inclination,
                Field::Velocity,
                Field::ColorR,
                Field::ColorG,
                Field::ColorB,
            ]
        }
    }

    /// Read the selected body's value for `field` from the live tree.
    pub fn value(&self, root: &OrbitingBody, field: Field) -> f32 {
        let body = resolve(root, &self.selected().path);
        match field {
            Field::Scale => body.scale,
            Field::Radius => body.orbital_radius,
            Field::Inclination => body.inclination,
            Field::Velocity => body.angular_velocity,
            Field::ColorR => body.color[0],
            Field::ColorG => body.color[1],
            Field::ColorB => body.color[2],
        }
    }

    /// Step the selected body's `field` by `steps` increments, clamped to
    /// the field's range. Fields hidden for root bodies are ignored there.
    pub fn adjust(&self, root: &mut OrbitingBody, field: Field, steps: i32) {
        if self.selected().is_root() && !matches!(field, Field::Scale | Field::ColorR | Field::ColorG | Field::ColorB) {
            return;
        }
        let (min, max, step) = field.range();
        let body = resolve_mut(root, &self.selected().path);
        let target = match field {
            Field::Scale => &mut body.scale,
            Field::Radius => &mut body.orbital_radius,
            Field::Inclination => &mut body.inclination,
            Field::Velocity => &mut body.angular_velocity,
            Field::ColorR => &mut body.color[0],
            Field::ColorG => &mut body.color[1],
            Field::ColorB => &mut body.color[2],
        };
        *target = (*target + steps as f32 * step).clamp(min, max);
    }
}

fn collect_entries(body: &OrbitingBody, path: &mut Vec<usize>, out: &mut Vec<PanelEntry>) {
    out.push(PanelEntry {
        name: body.name.clone(),
        path: path.clone(),
        depth: path.len(),
    });
    for (i, child) in body.children().iter().enumerate() {
        path.push(i);
        collect_entries(child, path, out);
        path.pop();
    }
}

fn resolve<'a>(root: &'a OrbitingBody, path: &[usize]) -> &'a OrbitingBody {
    path.iter().fold(root, |body, &i| &body.children()[i])
}

fn resolve_mut<'a>(root: &'a mut OrbitingBody, path: &[usize]) -> &'a mut OrbitingBody {
    path.iter()
        .fold(root, |body, &i| &mut body.children_mut()[i])
}

#[cfg(test)]
mod tests {
    use super::*;
    use orrery_scene::{BodyParams, sample_system};

    #[test]
    fn test_entries_are_pre_order() {
        let system = sample_system();
        let panel = ParameterPanel::new(&system);
        let names: Vec<&str> = panel.entries().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(
            names,
            [
                "Star", "Planet 1", "Planet 2", "Planet 3", "Planet 4", "Moon", "Submoon",
                "Planet 5"
            ]
        );
    }

    #[test]
    fn test_depth_follows_nesting() {
        let system = sample_system();
        let panel = ParameterPanel::new(&system);
        let submoon = panel
            .entries()
            .iter()
            .find(|e| e.name == "Submoon")
            .expect("sample system has a Submoon");
        assert_eq!(submoon.depth, 3);
        assert_eq!(submoon.path.len(), 3);
    }

    #[test]
    fn test_selection_wraps_both_ways() {
        let system = sample_system();
        let mut panel = ParameterPanel::new(&system);
        assert_eq!(panel.selected().name, "Star");

        panel.select_prev();
        assert_eq!(panel.selected().name, "Planet 5");

        panel.select_next();
        assert_eq!(panel.selected().name, "Star");
    }

    #[test]
    fn test_root_hides_orbit_fields() {
        let system = sample_system();
        let panel = ParameterPanel::new(&system);
        assert!(!panel.fields().contains(&Field::Radius));
        assert!(panel.fields().contains(&Field::Scale));

        let mut panel = panel;
        panel.select_next();
        assert!(panel.fields().contains(&Field::Radius));
    }

    #[test]
    fn test_adjust_writes_through_to_the_tree() {
        let mut system = sample_system();
        let mut panel = ParameterPanel::new(&system);
        panel.select_next(); // Planet 1

        let before = panel.value(&system, Field::Radius);
        panel.adjust(&mut system, Field::Radius, 3);
        let after = panel.value(&system, Field::Radius);
        assert!((after - (before + 0.3)).abs() < 1e-5);
        assert!((system.children()[0].orbital_radius - after).abs() < 1e-6);
    }

    #[test]
    fn test_adjust_clamps_to_range() {
        let mut system = sample_system();
        let mut panel = ParameterPanel::new(&system);
        panel.select_next();

        panel.adjust(&mut system, Field::Velocity, 1000);
        assert_eq!(panel.value(&system, Field::Velocity), 1.0);
        panel.adjust(&mut system, Field::Velocity, -1000);
        assert_eq!(panel.value(&system, Field::Velocity), -1.0);
    }

    #[test]
    fn test_root_orbit_adjust_is_a_no_op() {
        let mut system = sample_system();
        let panel = ParameterPanel::new(&system);
        panel.adjust(&mut system, Field::Radius, 5);
        assert_eq!(system.orbital_radius, 0.0);
    }

    #[test]
    fn test_out_of_range_value_untouched_until_edited() {
        let mut system = sample_system();
        // Star scale 6 is in range, but its velocity 1.0 sits at the edge;
        // force an out-of-range value and check reads pass it through.
        system.scale = 20.0;
        let panel = ParameterPanel::new(&system);
        assert_eq!(panel.value(&system, Field::Scale), 20.0);

        // A single downward step clamps back into range.
        panel.adjust(&mut system, Field::Scale, -1);
        assert_eq!(system.scale, 10.0);
    }

    #[test]
    fn test_panel_over_single_body() {
        let lone = orrery_scene::OrbitingBody::new("Lone", BodyParams::default());
        let mut panel = ParameterPanel::new(&lone);
        assert_eq!(panel.entries().len(), 1);
        panel.select_next();
        assert_eq!(panel.selected_index(), 0);
    }
}
