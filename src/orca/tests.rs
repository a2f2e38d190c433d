use super::*;
use crate::atom::Atom;
use crate::report::Report;

fn load() -> Orca {
    Orca::load("testfiles/opt.out").unwrap()
}

fn from_str(s: &str) -> Orca {
    Orca::new(Report::new(s.to_string()).unwrap())
}

#[test]
fn structure() {
    let orca = load();
    let got = orca.structure().unwrap();
    // bohr values from the cycle 2 block of the fixture, not cycle 1
    let want = [
        Atom::new(1, "O", 0.0, 0.0, 0.221665 * BOHR2ANG),
        Atom::new(2, "H", 0.0, 1.430902 * BOHR2ANG, -0.886660 * BOHR2ANG),
        Atom::new(3, "H", 0.0, -1.430902 * BOHR2ANG, -0.886660 * BOHR2ANG),
    ];
    assert_eq!(got.len(), orca.report().natoms());
    for (g, w) in got.iter().zip(&want) {
        assert_eq!(g.index, w.index);
        assert_eq!(g.symbol, w.symbol);
        for i in 0..3 {
            assert!(
                (g.coord[i] - w.coord[i]).abs() < 1e-6,
                "coordinate mismatch on atom {}",
                g.index
            );
        }
    }
    // the fixture run converged, so the same atoms come back as optimized
    assert!(orca.is_successful());
    assert_eq!(orca.optimized_structure().unwrap(), Some(got));
}

#[test]
fn unconverged_structure() {
    // same report with the success marker removed: the coordinates still
    // decode, but they are no longer labeled as optimized
    let contents = std::fs::read_to_string("testfiles/opt.out")
        .unwrap()
        .replace("HURRAY", "HOORAY");
    let orca = Orca::new(Report::new(contents).unwrap());
    assert!(!orca.is_successful());
    assert_eq!(orca.structure().unwrap().len(), 3);
    assert_eq!(orca.optimized_structure().unwrap(), None);
}

#[test]
fn atomic_numbers() {
    let got = load().atomic_numbers().unwrap();
    assert_eq!(got, vec![Some(8), Some(1), Some(1)]);
}

#[test]
fn structure_not_found() {
    let orca = from_str("Number of atoms ... 2\nHURRAY\n");
    assert!(orca.structure().unwrap_err().is_section_not_found());
}

#[test]
fn structure_truncated() {
    let orca = from_str(
        "Number of atoms ... 3
  #   XYZ [au]   r0(AA) [Ang.]  CN   C6(AA)   C8(AA)   C10(AA) [au]
  1   0.000000   0.000000   0.000000   O   0.883   2.927   10.440   201.574   5445.241
",
    );
    assert!(orca.structure().unwrap_err().is_truncated_report());
}

/// decoded symbols are normalized to title case whatever the report prints
#[test]
fn symbol_title_case() {
    let orca = from_str(
        "Number of atoms ... 1
  #   XYZ [au]   r0(AA) [Ang.]  CN   C6(AA)   C8(AA)   C10(AA) [au]
  1   0.000000   0.000000   0.000000   CL   1.640   5.366   17.438   413.581   9371.515
",
    );
    let got = orca.structure().unwrap();
    assert_eq!(got[0].symbol, "Cl");
    assert_eq!(got[0].atomic_number(), Some(17));
}

#[test]
fn frequencies() {
    let orca = load();
    let got = orca.frequencies().unwrap();
    assert_eq!(got.len(), 3 * orca.report().natoms());
    assert_eq!(got[..6], [0.0; 6]);
    assert_eq!(got[6..], [1538.92, 3642.32, 3747.71]);
}

#[test]
fn frequencies_truncated() {
    let orca = from_str(
        "Number of atoms ... 2
Scaling factor for frequencies =  1.000000000

     0:         0.00 cm**-1
     1:         0.00 cm**-1
",
    );
    assert!(orca.frequencies().unwrap_err().is_truncated_report());
}

#[test]
fn thermochemistry() {
    let got = load().thermochemistry().unwrap();
    let want = Thermo {
        electronic: -76.36974951,
        enthalpy: -76.33120850,
        entropy_term: 0.02166740,
        gibbs: -76.35287590,
    };
    assert_eq!(got, want);
}

/// the four summary lines can repeat and appear in any order; the occurrence
/// closest to the end of the report wins for each
#[test]
fn thermochemistry_takes_last() {
    let orca = from_str(
        "Number of atoms ... 1
Final Gibbs free energy          ...     -1.00 Eh
Electronic energy                ...     -2.00 Eh
Total Enthalpy                   ...     -2.10 Eh
Final entropy term               ...      0.50 Eh      1.00 kcal/mol
Electronic energy                ...     -3.00 Eh
Final Gibbs free energy          ...     -3.10 Eh
Total Enthalpy                   ...     -3.20 Eh
Final entropy term               ...      0.60 Eh      1.20 kcal/mol
",
    );
    let want = Thermo {
        electronic: -3.0,
        enthalpy: -3.2,
        entropy_term: 0.6,
        gibbs: -3.1,
    };
    assert_eq!(orca.thermochemistry().unwrap(), want);
}

#[test]
fn thermochemistry_incomplete() {
    let orca = from_str(
        "Number of atoms ... 1
Electronic energy                ...     -3.00 Eh
Total Enthalpy                   ...     -3.20 Eh
",
    );
    let got = orca.thermochemistry();
    assert!(matches!(got, Err(Error::IncompleteEnergySection(2))));
}

#[test]
fn build_record() {
    let orca = from_str(
        "Number of atoms                             ...      2

                    ***********************HURRAY********************

  #   XYZ [au]              r0(AA) [Ang.]  CN      C6(AA)     C8(AA)    C10(AA) [au]
  1     0.000000     0.000000     0.000000    H     0.720     0.967     3.089    48.376   1069.580
  2     1.000000     0.000000     0.000000    h     0.720     0.967     3.089    48.376   1069.580

Scaling factor for frequencies =  1.000000000  (already applied!)

     0:       -50.00 cm**-1
     1:         0.00 cm**-1
     2:         0.00 cm**-1
     3:         0.00 cm**-1
     4:         0.00 cm**-1
     5:         0.00 cm**-1

Electronic energy                ...     -1.00 Eh
Total Enthalpy                   ...     -0.90 Eh
Final entropy term               ...      0.01 Eh      6.28 kcal/mol
Final Gibbs free energy          ...     -0.91 Eh
",
    );
    // the lowercase `h` in the second row must come back title-cased
    let syms: Vec<_> = orca
        .structure()
        .unwrap()
        .iter()
        .map(|a| a.symbol.as_str())
        .collect();
    assert_eq!(syms, ["H", "H"]);
    let got = orca.build_record().unwrap();
    let want = ResultRecord {
        success: true,
        coordinates: vec![[0.0, 0.0, 0.0], [BOHR2ANG, 0.0, 0.0]],
        imaginary_count: 1,
        imaginary: vec![-50.0],
        electronic: -1.0,
        gibbs: -0.91,
        enthalpy: -0.9,
        entropy_term: 0.01,
    };
    assert_eq!(got, want);
}

#[test]
fn merge_record() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("results.json");
    let orca = load();
    orca.merge_record(&path, "water").unwrap();
    let got = store::load(&path).unwrap();
    assert_eq!(got.len(), 1);
    assert_eq!(got["water"], orca.build_record().unwrap());
}
