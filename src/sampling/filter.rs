use crate::transcript::Segment;

use super::window::Window;

/// Segments fully contained in the window, in input order.
///
/// Strict containment: `start >= window.start && end <= window.end`.
/// A segment straddling a window boundary is excluded here entirely;
/// a wider window may still capture it.
pub fn segments_in_window<'a>(segments: &'a [Segment], window: &Window) -> Vec<&'a Segment> {
    segments
        .iter()
        .filter(|seg| seg.start >= window.start && seg.end <= window.end)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seg(start: f64, end: f64, text: &str) -> Segment {
        Segment {
            start,
            end,
            text: text.to_string(),
        }
    }

    #[test]
    fn boundary_segments_are_kept_straddlers_dropped() {
        let segments = vec![
            seg(5.0, 15.0, "a"),  // starts before the window
            seg(10.0, 20.0, "b"), // exactly fills the window
            seg(12.0, 19.0, "c"), // strictly inside
            seg(18.0, 22.0, "d"), // ends after the window
        ];

        let window = Window::new(10.0, 20.0);
        let matched = segments_in_window(&segments, &window);

        let texts: Vec<&str> = matched.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(texts, vec!["b", "c"]);
    }

    #[test]
    fn empty_input_yields_empty_output() {
        let matched = segments_in_window(&[], &Window::new(0.0, 100.0));
        assert!(matched.is_empty());
    }
}
