//! Dip and strike separation of a bedding marker offset by a fault.
//!
//! The footwall keeps the bedding plane through the origin; the hangingwall
//! copy of the bedding is moved along the net slip. Both are cut by a
//! vertical section perpendicular to the fault strike and by the horizontal
//! map plane. In each view the bedding traces meet the fault trace at the
//! footwall and hangingwall cutoff points, and the distance between those
//! points is the separation seen in that view.
//!
//! Section coordinates run along the fault dip direction (abscissa) and up
//! (ordinate). Map coordinates are east and north.

use serde::{Deserialize, Serialize};
use slipsep_core::error::{Result, SlipSepError, Stage, ViewKind};
use slipsep_core::traits::{RoundTo, Validate};
use slipsep_core::Tolerance;
use slipsep_geology::netslip::{apply_displacement, NetSlip};
use slipsep_geology::orientation::Orientation;
use slipsep_math::{
    intersect_for_map, intersect_for_section, Basis2, Line2, PlaneEquation, Point2, Point3,
    Vector2, Vector3,
};

use crate::config::AnalysisConfig;
use crate::trace::BlockTrace;
use crate::trim::{trim_rule, AzimuthRelation, NormalSense, TrimRule};

/// Fault, bedding and net slip of one analysis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnalysisInput {
    pub fault: Orientation,
    pub bedding: Orientation,
    pub net_slip: NetSlip,
}

impl AnalysisInput {
    pub fn new(
        fault_dip: f64,
        fault_dip_direction: f64,
        bedding_dip: f64,
        bedding_dip_direction: f64,
        rake: f64,
        magnitude: f64,
    ) -> Result<Self> {
        Ok(Self {
            fault: Orientation::new(fault_dip, fault_dip_direction)?,
            bedding: Orientation::new(bedding_dip, bedding_dip_direction)?,
            net_slip: NetSlip::new(rake, magnitude)?,
        })
    }

    /// Angles, rake and magnitude truncated toward zero.
    pub fn truncated(&self) -> Self {
        Self {
            fault: self.fault.truncated(),
            bedding: self.bedding.truncated(),
            net_slip: NetSlip {
                rake: self.net_slip.rake.trunc(),
                magnitude: self.net_slip.magnitude.trunc(),
            },
        }
    }
}

impl Validate for AnalysisInput {
    fn validate(&self) -> Result<()> {
        self.fault.validate()?;
        self.bedding.validate()?;
        self.net_slip.validate()
    }
}

/// The planes of both fault blocks, built once per analysis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FaultBlockGeometry {
    /// Fault orientation with a north-south strike perturbed.
    pub fault: Orientation,
    /// Bedding orientation with a north-south strike perturbed.
    pub bedding: Orientation,
    pub fault_normal: Vector3,
    pub bedding_normal: Vector3,
    pub slip_direction: Vector3,
    pub hangingwall_origin: Point3,
    pub fault_plane: PlaneEquation,
    pub footwall_plane: PlaneEquation,
    pub hangingwall_plane: PlaneEquation,
    /// Horizontal normal of the vertical section, along the fault strike.
    pub section_normal: Vector3,
}

impl FaultBlockGeometry {
    pub fn new(input: &AnalysisInput, dip_direction_epsilon: f64) -> Self {
        let fault = input.fault.perturbed(dip_direction_epsilon);
        let bedding = input.bedding.perturbed(dip_direction_epsilon);
        let fault_normal = fault.normal();
        let bedding_normal = bedding.normal();

        let slip_direction = input.net_slip.unit_direction(&fault);
        let hangingwall_origin =
            apply_displacement(Point3::ZERO, slip_direction, input.net_slip.magnitude);

        Self {
            fault,
            bedding,
            fault_normal,
            bedding_normal,
            slip_direction,
            hangingwall_origin,
            fault_plane: PlaneEquation::from_normal_and_point(fault_normal, Point3::ZERO),
            footwall_plane: PlaneEquation::from_normal_and_point(bedding_normal, Point3::ZERO),
            hangingwall_plane: PlaneEquation::from_normal_and_point(
                bedding_normal,
                hangingwall_origin,
            ),
            section_normal: fault.strike_vector(),
        }
    }

    pub fn section_plane(&self) -> PlaneEquation {
        PlaneEquation::from_normal_and_point(self.section_normal, Point3::ZERO)
    }

    /// Fault normal seen in map view, (east, north).
    pub fn fault_normal_map(&self) -> Vector2 {
        Vector2::new(self.fault_normal.x, self.fault_normal.y)
    }
}

/// Traces and cutoff points of one view.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewTraces {
    pub fault: Line2,
    pub footwall: Line2,
    pub hangingwall: Line2,
    pub footwall_cutoff: Point2,
    pub hangingwall_cutoff: Point2,
}

impl ViewTraces {
    pub fn separation(&self) -> f64 {
        self.footwall_cutoff.distance(self.hangingwall_cutoff)
    }

    /// Hangingwall cutoff relative to the footwall cutoff.
    pub fn offset(&self) -> Vector2 {
        self.hangingwall_cutoff - self.footwall_cutoff
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionView {
    pub basis: Basis2,
    pub traces: ViewTraces,
    pub fault_samples: BlockTrace,
    /// Footwall bedding up to its cutoff.
    pub footwall_samples: BlockTrace,
    /// Hangingwall bedding from its cutoff on.
    pub hangingwall_samples: BlockTrace,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapView {
    pub traces: ViewTraces,
    pub fault_samples: BlockTrace,
    pub footwall_samples: BlockTrace,
    pub hangingwall_samples: BlockTrace,
    pub normal_sense: NormalSense,
    pub azimuth_relation: AzimuthRelation,
    /// Rule applied to the block samples; `None` when they were left whole.
    pub trim: Option<TrimRule>,
}

/// Whether the hangingwall marker sits below or above the footwall marker
/// in the section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DipSeparationSense {
    Normal,
    Reverse,
    None,
}

impl DipSeparationSense {
    pub fn of(section: &ViewTraces, tol: Tolerance) -> Self {
        let dy = section.offset().y;
        if tol.is_zero(dy) {
            DipSeparationSense::None
        } else if dy < 0.0 {
            DipSeparationSense::Normal
        } else {
            DipSeparationSense::Reverse
        }
    }
}

/// Which way the hangingwall marker is offset along the fault strike in map
/// view, for an observer looking across the fault.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrikeSeparationSense {
    LeftLateral,
    RightLateral,
    None,
}

impl StrikeSeparationSense {
    /// `strike` is the fault strike as an (east, north) unit vector.
    pub fn of(map: &ViewTraces, strike: Vector2, tol: Tolerance) -> Self {
        let along = map.offset().dot(strike);
        if tol.is_zero(along) {
            StrikeSeparationSense::None
        } else if along > 0.0 {
            StrikeSeparationSense::LeftLateral
        } else {
            StrikeSeparationSense::RightLateral
        }
    }
}

/// Full result of [`SeparationAnalyzer::analyze`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeparationAnalysis {
    /// The input as used, after truncation.
    pub input: AnalysisInput,
    /// Dip separation rounded to the configured decimals.
    pub dip_separation: f64,
    /// Strike separation rounded to the configured decimals.
    pub strike_separation: f64,
    pub raw_dip_separation: f64,
    pub raw_strike_separation: f64,
    pub dip_sense: DipSeparationSense,
    pub strike_sense: StrikeSeparationSense,
    pub fault_normal_map: Vector2,
    pub section: SectionView,
    pub map: MapView,
}

/// Runs separation analyses with a fixed configuration.
#[derive(Debug, Clone, Default)]
pub struct SeparationAnalyzer {
    config: AnalysisConfig,
}

impl SeparationAnalyzer {
    pub fn new(config: AnalysisConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Validate `input` and apply the configured truncation.
    pub fn effective_input(&self, input: &AnalysisInput) -> Result<AnalysisInput> {
        input.validate()?;
        Ok(if self.config.truncate_inputs {
            input.truncated()
        } else {
            *input
        })
    }

    pub fn prepare(&self, input: &AnalysisInput) -> Result<FaultBlockGeometry> {
        let input = self.effective_input(input)?;
        Ok(FaultBlockGeometry::new(
            &input,
            self.config.dip_direction_epsilon,
        ))
    }

    pub fn section_view(&self, geometry: &FaultBlockGeometry) -> Result<SectionView> {
        let basis = Basis2::section(geometry.section_normal);
        let traces = self.view_traces(ViewKind::Section, &basis, &geometry.section_plane(), geometry)?;

        let window = &self.config.section_window;
        Ok(SectionView {
            basis,
            fault_samples: BlockTrace::sample(&traces.fault, &window.abscissas()),
            footwall_samples: BlockTrace::sample(
                &traces.footwall,
                &window.abscissas_through(traces.footwall_cutoff.x),
            ),
            hangingwall_samples: BlockTrace::sample(
                &traces.hangingwall,
                &window.abscissas_from(traces.hangingwall_cutoff.x),
            ),
            traces,
        })
    }

    pub fn map_view(&self, geometry: &FaultBlockGeometry) -> Result<MapView> {
        let traces = self.view_traces(
            ViewKind::Map,
            &Basis2::map(),
            &PlaneEquation::horizontal(),
            geometry,
        )?;

        let xs = self.config.map_window.abscissas();
        let mut footwall_samples = BlockTrace::sample(&traces.footwall, &xs);
        let mut hangingwall_samples = BlockTrace::sample(&traces.hangingwall, &xs);

        let normal_sense = NormalSense::of(geometry.fault_normal.x);
        let azimuth_relation = AzimuthRelation::of(
            geometry.bedding.folded_dip_direction(),
            geometry.fault.folded_dip_direction(),
        );
        let trim = trim_rule(normal_sense, azimuth_relation);
        match trim {
            // The footwall reference point is the origin.
            Some(rule) => rule.apply(
                &mut footwall_samples,
                &mut hangingwall_samples,
                Point2::ZERO,
                traces.hangingwall_cutoff,
            ),
            None => tracing::debug!(
                ?normal_sense,
                ?azimuth_relation,
                "map block traces left untrimmed"
            ),
        }

        Ok(MapView {
            fault_samples: BlockTrace::sample(&traces.fault, &xs),
            footwall_samples,
            hangingwall_samples,
            normal_sense,
            azimuth_relation,
            trim,
            traces,
        })
    }

    pub fn analyze(&self, input: &AnalysisInput) -> Result<SeparationAnalysis> {
        let input = self.effective_input(input)?;
        let geometry = FaultBlockGeometry::new(&input, self.config.dip_direction_epsilon);
        tracing::debug!(?input, hangingwall_origin = ?geometry.hangingwall_origin, "analyzing separation");

        let section = self.section_view(&geometry)?;
        let map = self.map_view(&geometry)?;

        let tol = self.config.tolerance;
        let strike = geometry.fault.strike_vector();
        let raw_dip_separation = section.traces.separation();
        let raw_strike_separation = map.traces.separation();
        let analysis = SeparationAnalysis {
            input,
            dip_separation: raw_dip_separation.round_to(self.config.decimals),
            strike_separation: raw_strike_separation.round_to(self.config.decimals),
            raw_dip_separation,
            raw_strike_separation,
            dip_sense: DipSeparationSense::of(&section.traces, tol),
            strike_sense: StrikeSeparationSense::of(
                &map.traces,
                Vector2::new(strike.x, strike.y),
                tol,
            ),
            fault_normal_map: geometry.fault_normal_map(),
            section,
            map,
        };
        tracing::debug!(
            dip = analysis.raw_dip_separation,
            strike = analysis.raw_strike_separation,
            "separation computed"
        );
        Ok(analysis)
    }

    /// Fault and bedding traces on `reference`, seen through `basis`, and
    /// their cutoff points.
    fn view_traces(
        &self,
        view: ViewKind,
        basis: &Basis2,
        reference: &PlaneEquation,
        geometry: &FaultBlockGeometry,
    ) -> Result<ViewTraces> {
        let tol = self.config.tolerance;
        let trace = |plane: &PlaneEquation, stage: Stage| -> Result<Line2> {
            let in_view = |e: SlipSepError| e.in_view(view, stage);
            let intersection = match view {
                ViewKind::Section => intersect_for_section(plane, reference, tol),
                ViewKind::Map => intersect_for_map(plane, reference, tol),
            }
            .map_err(in_view)?;
            let line = basis.project_line(&intersection.line, tol).map_err(in_view)?;
            Ok(match view {
                ViewKind::Section => line,
                ViewKind::Map => line.mirrored(),
            })
        };

        let fault = trace(&geometry.fault_plane, Stage::FaultTrace)?;
        let footwall = trace(&geometry.footwall_plane, Stage::FootwallTrace)?;
        let hangingwall = trace(&geometry.hangingwall_plane, Stage::HangingwallTrace)?;

        let footwall_cutoff = fault
            .intersect(&footwall, tol)
            .map_err(|e| e.in_view(view, Stage::FootwallCutoff))?;
        let hangingwall_cutoff = fault
            .intersect(&hangingwall, tol)
            .map_err(|e| e.in_view(view, Stage::HangingwallCutoff))?;

        Ok(ViewTraces {
            fault,
            footwall,
            hangingwall,
            footwall_cutoff,
            hangingwall_cutoff,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn input(values: [f64; 6]) -> AnalysisInput {
        let [fd, fdd, bd, bdd, rake, mag] = values;
        AnalysisInput::new(fd, fdd, bd, bdd, rake, mag).unwrap()
    }

    #[test]
    fn test_truncation_is_toward_zero() {
        let t = input([59.9, 10.7, 30.2, 89.99, 90.5, 10.9]).truncated();
        assert_eq!(t.fault, Orientation { dip: 59.0, dip_direction: 10.0 });
        assert_eq!(t.bedding, Orientation { dip: 30.0, dip_direction: 89.0 });
        assert_eq!(t.net_slip.rake, 90.0);
        assert_eq!(t.net_slip.magnitude, 10.0);
    }

    #[test]
    fn test_hangingwall_origin_follows_slip() {
        let geometry = FaultBlockGeometry::new(&input([60.0, 0.0, 30.0, 90.0, 90.0, 10.0]), 1e-5);
        assert_relative_eq!(geometry.hangingwall_origin.y, 5.0, epsilon = 1e-6);
        assert_relative_eq!(geometry.hangingwall_origin.z, -(75f64.sqrt()), epsilon = 1e-6);
        assert_relative_eq!(
            geometry.hangingwall_plane.evaluate(geometry.hangingwall_origin),
            0.0,
            epsilon = 1e-12
        );
        assert_eq!(geometry.bedding.dip_direction, 90.00001);
    }

    #[test]
    fn test_section_samples_follow_cutoffs() {
        let analyzer = SeparationAnalyzer::default();
        let geometry = analyzer.prepare(&input([60.0, 0.0, 30.0, 90.0, 90.0, 10.0])).unwrap();
        let section = analyzer.section_view(&geometry).unwrap();
        assert_eq!(section.fault_samples.len(), 40);
        let fw_last = section.footwall_samples.points.last().unwrap();
        assert!(fw_last.x <= section.traces.footwall_cutoff.x + 1.0);
        let hw_first = section.hangingwall_samples.points.first().unwrap();
        assert_relative_eq!(hw_first.x, section.traces.hangingwall_cutoff.x, epsilon = 1e-12);
    }

    #[test]
    fn test_dip_sense() {
        let traces = |hw: Point2| ViewTraces {
            fault: Line2::new(1.0, 0.0),
            footwall: Line2::new(0.0, 0.0),
            hangingwall: Line2::new(0.0, hw.y),
            footwall_cutoff: Point2::ZERO,
            hangingwall_cutoff: hw,
        };
        let tol = Tolerance::default();
        assert_eq!(DipSeparationSense::of(&traces(Point2::new(5.0, -8.0)), tol), DipSeparationSense::Normal);
        assert_eq!(DipSeparationSense::of(&traces(Point2::new(-5.0, 8.0)), tol), DipSeparationSense::Reverse);
        assert_eq!(DipSeparationSense::of(&traces(Point2::new(3.0, 0.0)), tol), DipSeparationSense::None);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = AnalysisConfig {
            decimals: 40,
            ..AnalysisConfig::default()
        };
        assert!(matches!(SeparationAnalyzer::new(config), Err(SlipSepError::Config(_))));
    }
}
