//! # Carpentry Joint Proportions
//!
//! Closed-form dimensions for three traditional joints, all proportioned
//! from the member sizes (mm):
//!
//! - [`tenon_joint`] - column tenon into the bottom sill
//! - [`gooseneck_joint`] - tie beam gooseneck splice
//! - [`scarf_joint`] - column scarf splice
//!
//! Every dimension is reported as `"<name> = <value>"`.
//!
//! ## Example
//!
//! ```rust
//! use timber_core::calculations::joints::{tenon_joint, JointInput};
//!
//! let dims = JointInput::default().resolve().unwrap();
//! let tenon = tenon_joint(&dims);
//! assert_eq!(tenon.ttl_clm.print_value, "ttl_clm = 42.33");
//! ```

use serde::{Deserialize, Serialize};

use super::cross_section::FootprintInput;
use crate::errors::CalcResult;
use crate::inputs::resolve_length;
use crate::report::Metric;

/// The `cross_section` bundle of a joint request (mm).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JointSectionInput {
    pub column_w: Option<f64>,
    pub column_h: Option<f64>,
    pub tie_beam_h: Option<f64>,
    pub bottom_sill_w: Option<f64>,
}

/// Joint request bundles. Only `height` is read from the footprint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JointInput {
    pub footprint: FootprintInput,
    pub cross_section: JointSectionInput,
}

impl JointInput {
    pub fn resolve(&self) -> CalcResult<JointDimensions> {
        let s = &self.cross_section;
        Ok(JointDimensions {
            column_width: resolve_length("column_w", s.column_w, 85.0)?,
            column_height: resolve_length("column_h", s.column_h, 127.0)?,
            tie_beam_height: resolve_length("tie_beam_h", s.tie_beam_h, 190.0)?,
            bottom_sill_width: resolve_length("bottom_sill_w", s.bottom_sill_w, 158.0)?,
            footprint_height: self.footprint.resolve()?.column_length,
        })
    }
}

/// Member sizes the joints are proportioned from
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct JointDimensions {
    /// w_b (mm)
    pub column_width: f64,
    /// t_b (mm)
    pub column_height: f64,
    /// t_t (mm)
    pub tie_beam_height: f64,
    /// b_s (mm)
    pub bottom_sill_width: f64,
    /// H (m)
    pub footprint_height: f64,
}

/// Tenon joint dimensions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TenonJoint {
    pub b_clm: Metric<f64>,
    pub ttl_clm: Metric<f64>,
    pub btl_clm: Metric<f64>,
    pub dtt_clm: Metric<f64>,
    pub dtj_clm: Metric<f64>,
    pub dtl_clm: Metric<f64>,
}

/// Column tenon: breadth, tenon thickness and width, and its depths into
/// the sill.
pub fn tenon_joint(j: &JointDimensions) -> TenonJoint {
    let w_b = j.column_width;
    let t_b = j.column_height;
    let b_s = j.bottom_sill_width;
    TenonJoint {
        b_clm: Metric::labelled("b_clm", w_b),
        ttl_clm: Metric::labelled("ttl_clm", t_b * (1.0 / 3.0)),
        btl_clm: Metric::labelled("btl_clm", w_b * (1.0 / 3.0)),
        dtt_clm: Metric::labelled("dtt_clm", b_s * (1.0 / 6.0)),
        dtj_clm: Metric::labelled("dtj_clm", b_s * (3.0 / 5.0)),
        dtl_clm: Metric::labelled("dtl_clm", b_s * (1.0 / 3.0)),
    }
}

/// Gooseneck joint dimensions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GooseneckJoint {
    pub jc1: Metric<f64>,
    pub jc2: Metric<f64>,
    pub jc3: Metric<f64>,
    pub jc4: Metric<f64>,
    pub jc5: Metric<f64>,
    pub jc6: Metric<f64>,
    pub jc7: Metric<f64>,
}

pub fn gooseneck_joint(j: &JointDimensions) -> GooseneckJoint {
    let t_t = j.tie_beam_height;
    let t_b = j.column_height;
    GooseneckJoint {
        jc1: Metric::labelled("jc1", t_t * (1.0 / 3.0)),
        jc2: Metric::labelled("jc2", t_t * (1.0 / 6.0)),
        jc3: Metric::labelled("jc3", t_b),
        jc4: Metric::labelled("jc4", t_b * (1.0 / 2.0)),
        // Neck length scales with the building height (m → cm)
        jc5: Metric::labelled("jc5", j.footprint_height * (1.0 / 5.0) * 100.0),
        jc6: Metric::labelled("jc6", t_t),
        jc7: Metric::labelled("jc7", t_b * (1.0 / 6.0)),
    }
}

/// Scarf joint dimensions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScarfJoint {
    pub w_b: Metric<f64>,
    pub t_b: Metric<f64>,
    pub e_sb: Metric<f64>,
    pub gl_s_b: Metric<f64>,
    pub l_scr: Metric<f64>,
    pub ttu_clm: Metric<f64>,
    pub btu_clm: Metric<f64>,
    pub leu_s_b: Metric<f64>,
    pub lsu_s_b: Metric<f64>,
    #[serde(rename = "D")]
    pub d: Metric<f64>,
}

pub fn scarf_joint(j: &JointDimensions) -> ScarfJoint {
    let w_b = j.column_width;
    let t_b = j.column_height;
    ScarfJoint {
        w_b: Metric::labelled("w_b", w_b),
        t_b: Metric::labelled("t_b", t_b),
        e_sb: Metric::labelled("e_sb", t_b / 6.0),
        gl_s_b: Metric::labelled("gl_s_b", t_b / 6.0),
        l_scr: Metric::labelled("l_scr", 3.0 * t_b / 6.0),
        ttu_clm: Metric::labelled("ttu_clm", t_b / 2.0),
        btu_clm: Metric::labelled("btu_clm", w_b / 2.0),
        leu_s_b: Metric::labelled("leu_s_b", t_b / 4.0),
        lsu_s_b: Metric::labelled("lsu_s_b", t_b / 2.0),
        d: Metric::labelled("D", t_b / 6.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn defaults() -> JointDimensions {
        JointInput::default().resolve().unwrap()
    }

    #[test]
    fn test_tenon_defaults() {
        let t = tenon_joint(&defaults());
        assert_eq!(t.b_clm.value, 85.0);
        assert_eq!(t.ttl_clm.value, 42.33);
        assert_eq!(t.btl_clm.value, 28.33);
        assert_eq!(t.dtt_clm.value, 26.33);
        assert_eq!(t.dtj_clm.value, 94.8);
        assert_eq!(t.dtl_clm.value, 52.67);
        assert_eq!(t.b_clm.print_value, "b_clm = 85.00");
    }

    #[test]
    fn test_gooseneck_defaults() {
        let g = gooseneck_joint(&defaults());
        assert_eq!(g.jc1.value, 63.33);
        assert_eq!(g.jc2.value, 31.67);
        assert_eq!(g.jc3.value, 127.0);
        assert_eq!(g.jc4.value, 63.5);
        assert_eq!(g.jc5.print_value, "jc5 = 40.00");
        assert_eq!(g.jc6.value, 190.0);
        assert_eq!(g.jc7.value, 21.17);
    }

    #[test]
    fn test_scarf_defaults_and_keys() {
        let s = scarf_joint(&defaults());
        assert_eq!(s.l_scr.value, 63.5);
        assert_eq!(s.btu_clm.value, 42.5);
        assert_eq!(s.leu_s_b.value, 31.75);
        assert_eq!(s.d.print_value, "D = 21.17");

        let json = serde_json::to_value(&s).unwrap();
        assert_eq!(json["D"]["value"], 21.17);
        assert_eq!(json["w_b"]["print_value"], "w_b = 85.00");
    }

    #[test]
    fn test_inputs_drive_dimensions() {
        let input: JointInput = serde_json::from_str(
            r#"{"footprint": {"height": 3}, "cross_section": {"column_h": 150, "tie_beam_h": 0}}"#,
        )
        .unwrap();
        let dims = input.resolve().unwrap();
        assert_eq!(dims.tie_beam_height, 190.0);
        let g = gooseneck_joint(&dims);
        assert_eq!(g.jc3.value, 150.0);
        assert_eq!(g.jc5.value, 60.0);
        assert_eq!(scarf_joint(&dims).ttu_clm.value, 75.0);
    }

    #[test]
    fn test_value_and_text_agree_on_ties() {
        let input = JointInput {
            cross_section: JointSectionInput {
                column_w: Some(85.125),
                ..JointSectionInput::default()
            },
            ..JointInput::default()
        };
        let t = tenon_joint(&input.resolve().unwrap());
        assert_eq!(t.b_clm.value, 85.12);
        assert_eq!(t.b_clm.print_value, "b_clm = 85.12");
    }
}
