//! Building interfaces from `[rupture.interface<N>]` input sections.
//!
//! ```text
//! [rupture.interface0]
//! friction slipweak            # kind [law]
//! -120.0 70.0 0.0              # background traction: sn s2 s3
//! nucleation.dat               # load files, or "none"
//! 0.677 0.525 0.4              # law parameters, "none", or "file <path>"
//! ```
//!
//! `locked` and `free` sections need only the kind line. A per-point
//! parameter file holds one `gi gj p1 .. pk` line for every point, keyed
//! by global in-plane index.

use std::path::Path;

use rupture_core::{
    ConfigError, FaultMode, InputFile, InterfaceGeometry, InterfaceId, LocalVector, Section,
};
use rupture_interface::{Interface, InterfaceKind};

use crate::free::FreeInterface;
use crate::frictionless::Frictionless;
use crate::friction_interface::FrictionInterface;
use crate::law::FrictionLaw;
use crate::load::{LoadPerturbation, LoadSet};
use crate::locked::LockedInterface;
use crate::rate_state::{RateAndState, RateStateParams, StateEvolution};
use crate::slip_weakening::{SlipWeakening, SlipWeakeningParams};

/// Section marker of the interface with index `id`.
pub fn interface_marker(id: InterfaceId) -> String {
    format!("[rupture.interface{}]", id.0)
}

/// Friction law keywords accepted on the kind line.
pub const LAW_KEYWORDS: [&str; 4] = [
    "frictionless",
    "slipweak",
    "ratestate_aging",
    "ratestate_slip",
];

/// Where an interface's parameters come from.
enum ParamSource<'a> {
    None,
    Inline(Vec<f64>),
    File(&'a str),
}

/// One row of parameters with the location it was read from.
struct ParamRow {
    source: String,
    line: usize,
    values: Vec<f64>,
}

impl ParamRow {
    fn convert<P>(&self, parse: impl Fn(&[f64]) -> Result<P, String>) -> Result<P, ConfigError> {
        parse(&self.values).map_err(|reason| ConfigError::Parse {
            source: self.source.clone(),
            line: self.line,
            reason,
        })
    }
}

/// Read the section for interface `id` and build it.
///
/// # Errors
///
/// Returns [`ConfigError::MissingSection`] if the section is absent,
/// [`ConfigError::UnexpectedEof`] if it ends early, and
/// [`ConfigError::Parse`] / [`ConfigError::Io`] for malformed lines or
/// unreadable companion files.
pub fn interface_from_input(
    input: &InputFile,
    id: InterfaceId,
    name: &str,
    mode: FaultMode,
    geometry: InterfaceGeometry,
) -> Result<Box<dyn Interface>, ConfigError> {
    let mut section = input.section(&interface_marker(id))?;
    let (line, text) = section.expect_line()?;
    let mut words = text.split_whitespace();
    let kind_word = words.next().unwrap_or_default();
    let kind = InterfaceKind::from_keyword(kind_word).ok_or_else(|| {
        section.error_at(line, format!("unknown interface kind '{kind_word}'"))
    })?;
    match kind {
        InterfaceKind::Locked => {
            return Ok(Box::new(LockedInterface::new(name, id, mode, &geometry)));
        }
        InterfaceKind::Free => {
            return Ok(Box::new(FreeInterface::new(name, id, mode, &geometry)));
        }
        InterfaceKind::Friction => {}
    }
    let law_word = words
        .next()
        .ok_or_else(|| section.error_at(line, "friction interface needs a law"))?;
    if !LAW_KEYWORDS.contains(&law_word) {
        return Err(section.error_at(line, format!("unknown friction law '{law_word}'")));
    }
    if let Some(extra) = words.next() {
        return Err(section.error_at(line, format!("unexpected token '{extra}'")));
    }

    let loads = read_loads(&mut section)?;
    let (line, text) = section.expect_line()?;
    let params = match text.split_whitespace().collect::<Vec<_>>()[..] {
        ["none"] => ParamSource::None,
        ["file", path] => ParamSource::File(path),
        _ => ParamSource::Inline(section.parse_tokens(line, text, None)?),
    };
    let law = build_law(law_word, params, &geometry, &section, line)?;

    let iface = FrictionInterface::builder()
        .name(name)
        .id(id)
        .mode(mode)
        .geometry(geometry)
        .law(law)
        .loads(loads)
        .build()?;
    Ok(Box::new(iface))
}

fn read_loads(section: &mut Section<'_>) -> Result<LoadSet, ConfigError> {
    let (line, text) = section.expect_line()?;
    let bg: Vec<f64> = section.parse_tokens(line, text, Some(3))?;
    let mut loads = LoadSet::new(LocalVector::new(bg[0], bg[1], bg[2]));

    let (_, text) = section.expect_line()?;
    if text.trim() != "none" {
        for path in text.split_whitespace() {
            loads = loads.with_perturbation(LoadPerturbation::from_path(path)?);
        }
    }
    Ok(loads)
}

fn build_law(
    word: &str,
    params: ParamSource<'_>,
    geometry: &InterfaceGeometry,
    section: &Section<'_>,
    line: usize,
) -> Result<Box<dyn FrictionLaw>, ConfigError> {
    let inline = |values: Vec<f64>| ParamRow {
        source: section.source().to_string(),
        line,
        values,
    };
    let invalid = |reason: String| section.error_at(line, reason);

    match word {
        "frictionless" => match params {
            ParamSource::None => Ok(Box::new(Frictionless)),
            _ => Err(invalid("frictionless takes no parameters".to_string())),
        },
        "slipweak" => {
            let law = match params {
                ParamSource::None => {
                    return Err(invalid(format!("law '{word}' needs parameters")));
                }
                ParamSource::Inline(values) => SlipWeakening::uniform(
                    inline(values).convert(SlipWeakeningParams::from_values)?,
                ),
                ParamSource::File(path) => SlipWeakening::per_point(
                    read_point_table(path, geometry)?
                        .iter()
                        .map(|r| r.convert(SlipWeakeningParams::from_values))
                        .collect::<Result<Vec<_>, _>>()?,
                ),
            };
            Ok(Box::new(law.map_err(invalid)?))
        }
        _ => {
            let evolution = word
                .strip_prefix("ratestate_")
                .and_then(StateEvolution::from_keyword)
                .ok_or_else(|| invalid(format!("unknown friction law '{word}'")))?;
            let law = match params {
                ParamSource::None => {
                    return Err(invalid(format!("law '{word}' needs parameters")));
                }
                ParamSource::Inline(values) => RateAndState::uniform(
                    inline(values).convert(RateStateParams::from_values)?,
                    evolution,
                ),
                ParamSource::File(path) => RateAndState::per_point(
                    read_point_table(path, geometry)?
                        .iter()
                        .map(|r| r.convert(RateStateParams::from_values))
                        .collect::<Result<Vec<_>, _>>()?,
                    evolution,
                ),
            };
            Ok(Box::new(law.map_err(invalid)?))
        }
    }
}

/// Read a per-point parameter file into rows ordered by point slot.
fn read_point_table(
    path: impl AsRef<Path>,
    geometry: &InterfaceGeometry,
) -> Result<Vec<ParamRow>, ConfigError> {
    let path = path.as_ref();
    let source = path.display().to_string();
    let text = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
        path: source.clone(),
        reason: e.to_string(),
    })?;

    let [n1, n2] = geometry.shape();
    let mut by_index: Vec<Option<ParamRow>> = (0..n1 * n2).map(|_| None).collect();
    for (idx, raw) in table_lines(&text) {
        let err = |reason: String| ConfigError::Parse {
            source: source.clone(),
            line: idx,
            reason,
        };
        let mut tokens = raw.split_whitespace();
        let mut index = || -> Result<usize, ConfigError> {
            let tok = tokens
                .next()
                .ok_or_else(|| err("expected 'gi gj' before parameters".to_string()))?;
            tok.parse()
                .map_err(|_| err(format!("cannot parse index '{tok}'")))
        };
        let (gi, gj) = (index()?, index()?);
        if gi >= n1 || gj >= n2 {
            return Err(err(format!("point ({gi}, {gj}) outside {n1} x {n2}")));
        }
        let values = tokens
            .map(|t| t.parse::<f64>().map_err(|_| err(format!("cannot parse '{t}'"))))
            .collect::<Result<Vec<_>, _>>()?;
        let slot = &mut by_index[geometry.flat_index([gi, gj])];
        if slot.is_some() {
            return Err(err(format!("point ({gi}, {gj}) listed twice")));
        }
        *slot = Some(ParamRow {
            source: source.clone(),
            line: idx,
            values,
        });
    }

    geometry
        .points()
        .map(|(_, global)| {
            by_index[geometry.flat_index(global)]
                .take()
                .ok_or_else(|| ConfigError::InvalidParameter {
                    reason: format!(
                        "{source}: no parameters for point ({}, {})",
                        global[0], global[1]
                    ),
                })
        })
        .collect()
}

/// Non-blank, comment-stripped lines of a whole file with 1-based numbers.
fn table_lines(text: &str) -> impl Iterator<Item = (usize, &str)> {
    text.lines().enumerate().filter_map(|(i, raw)| {
        let line = raw.split('#').next().unwrap_or_default();
        (!line.trim().is_empty()).then_some((i + 1, line))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rupture_core::BlockId;

    fn geometry(shape: [usize; 2]) -> InterfaceGeometry {
        InterfaceGeometry::single_block(BlockId(0), shape).unwrap()
    }

    fn build(text: &str, shape: [usize; 2]) -> Result<Box<dyn Interface>, ConfigError> {
        let input = InputFile::from_text("test.in", text);
        interface_from_input(
            &input,
            InterfaceId(0),
            "fault",
            FaultMode::InPlane,
            geometry(shape),
        )
    }

    fn temp_file(name: &str, contents: &str) -> std::path::PathBuf {
        let dir = std::env::temp_dir().join(format!("rupture-input-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn slip_weakening_section_builds_friction_interface() {
        let iface = build(
            "[rupture.interface0]\nfriction slipweak\n-120.0 70.0 0.0\nnone\n0.677 0.525 0.4\n",
            [2, 2],
        )
        .unwrap();
        assert_eq!(iface.kind(), InterfaceKind::Friction);
        assert_eq!(iface.name(), "fault");
    }

    #[test]
    fn locked_and_free_need_only_the_kind_line() {
        let iface = build("[rupture.interface0]\nlocked\n", [1, 1]).unwrap();
        assert_eq!(iface.kind(), InterfaceKind::Locked);
        let iface = build("[rupture.interface0]\nfree\n", [1, 1]).unwrap();
        assert_eq!(iface.kind(), InterfaceKind::Free);
    }

    #[test]
    fn missing_section_is_reported() {
        let err = build("[rupture.interface1]\nlocked\n", [1, 1]).err().unwrap();
        assert_eq!(
            err,
            ConfigError::MissingSection {
                marker: "[rupture.interface0]".into()
            }
        );
    }

    #[test]
    fn truncated_section_is_unexpected_eof() {
        let err = build("[rupture.interface0]\nfriction slipweak\n-1 0 0\n", [1, 1])
            .err()
            .unwrap();
        assert!(matches!(err, ConfigError::UnexpectedEof { .. }));
    }

    #[test]
    fn unknown_law_is_a_parse_error() {
        let err = build(
            "[rupture.interface0]\nfriction velweak\n-1 0 0\nnone\n1 2 3\n",
            [1, 1],
        )
        .err()
        .unwrap();
        assert!(matches!(err, ConfigError::Parse { line: 2, .. }));
    }

    #[test]
    fn bad_parameters_point_at_their_line() {
        let err = build(
            "[rupture.interface0]\nfriction slipweak\n-1 0 0\nnone\n0.4 0.6 0.5\n",
            [1, 1],
        )
        .err()
        .unwrap();
        match err {
            ConfigError::Parse { line, reason, .. } => {
                assert_eq!(line, 5);
                assert!(reason.contains("mus"));
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn frictionless_rejects_parameters() {
        assert!(build(
            "[rupture.interface0]\nfriction frictionless\n-1 0 0\nnone\nnone\n",
            [1, 1]
        )
        .is_ok());
        assert!(build(
            "[rupture.interface0]\nfriction frictionless\n-1 0 0\nnone\n0.6\n",
            [1, 1]
        )
        .is_err());
    }

    #[test]
    fn rate_state_keywords_select_evolution() {
        let iface = build(
            "[rupture.interface0]\nfriction ratestate_slip\n-10 5 0\nnone\n0.01 0.014 1e-6 0.6 0.02 0.6\n",
            [1, 1],
        )
        .unwrap();
        assert_eq!(iface.kind(), InterfaceKind::Friction);
        assert!(build(
            "[rupture.interface0]\nfriction ratestate_fast\n-10 5 0\nnone\n0.01 0.014 1e-6 0.6 0.02 0.6\n",
            [1, 1],
        )
        .is_err());
    }

    #[test]
    fn load_files_are_read() {
        let load = temp_file("load.dat", "0 0 0 0\n1 0 1 0\n");
        let text = format!(
            "[rupture.interface0]\nfriction slipweak\n-10 5 0\n{}\n0.6 0.4 0.5\n",
            load.display()
        );
        assert!(build(&text, [1, 1]).is_ok());

        let text = "[rupture.interface0]\nfriction slipweak\n-10 5 0\n/nonexistent/load.dat\n0.6 0.4 0.5\n";
        assert!(matches!(
            build(text, [1, 1]).err().unwrap(),
            ConfigError::Io { .. }
        ));
    }

    #[test]
    fn per_point_file_must_cover_every_point() {
        let full = temp_file(
            "params_full.dat",
            "# gi gj mus mud dc\n0 0 0.6 0.4 0.5\n0 1 0.7 0.4 0.5\n",
        );
        let text = format!(
            "[rupture.interface0]\nfriction slipweak\n-10 5 0\nnone\nfile {}\n",
            full.display()
        );
        assert!(build(&text, [1, 2]).is_ok());

        let partial = temp_file("params_partial.dat", "0 0 0.6 0.4 0.5\n");
        let text = format!(
            "[rupture.interface0]\nfriction slipweak\n-10 5 0\nnone\nfile {}\n",
            partial.display()
        );
        assert!(matches!(
            build(&text, [1, 2]).err().unwrap(),
            ConfigError::InvalidParameter { .. }
        ));

        let twice = temp_file("params_twice.dat", "0 0 0.6 0.4 0.5\n0 0 0.6 0.4 0.5\n");
        let text = format!(
            "[rupture.interface0]\nfriction slipweak\n-10 5 0\nnone\nfile {}\n",
            twice.display()
        );
        assert!(matches!(
            build(&text, [1, 2]).err().unwrap(),
            ConfigError::Parse { line: 2, .. }
        ));
    }

    #[test]
    fn marker_uses_interface_index() {
        assert_eq!(interface_marker(InterfaceId(7)), "[rupture.interface7]");
    }
}
