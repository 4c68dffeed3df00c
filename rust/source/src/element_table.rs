// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Canonical element table indexed by atomic number.

use rustc_hash::FxHashMap;

/// A canonical (tabulated) element.
#[derive(Debug, Clone, PartialEq)]
pub struct StandardElement {
    /// Chemical symbol, e.g. `"Fe"`.
    pub symbol: String,
    /// Display name, e.g. `"Iron"`.
    pub name: String,
    pub z: u32,
    /// Standard atomic mass in g/mole.
    pub a: f64,
}

/// (symbol, name, standard atomic mass in g/mole) for Z = 1..=100.
const DEFAULT_ELEMENTS: [(&str, &str, f64); 100] = [
    ("H", "Hydrogen", 1.00794),
    ("He", "Helium", 4.002602),
    ("Li", "Lithium", 6.941),
    ("Be", "Beryllium", 9.012182),
    ("B", "Boron", 10.811),
    ("C", "Carbon", 12.0107),
    ("N", "Nitrogen", 14.0067),
    ("O", "Oxygen", 15.9994),
    ("F", "Fluorine", 18.9984032),
    ("Ne", "Neon", 20.1797),
    ("Na", "Sodium", 22.98977),
    ("Mg", "Magnesium", 24.305),
    ("Al", "Aluminium", 26.981538),
    ("Si", "Silicon", 28.0855),
    ("P", "Phosphorus", 30.973761),
    ("S", "Sulfur", 32.065),
    ("Cl", "Chlorine", 35.453),
    ("Ar", "Argon", 39.948),
    ("K", "Potassium", 39.0983),
    ("Ca", "Calcium", 40.078),
    ("Sc", "Scandium", 44.95591),
    ("Ti", "Titanium", 47.867),
    ("V", "Vanadium", 50.9415),
    ("Cr", "Chromium", 51.9961),
    ("Mn", "Manganese", 54.938049),
    ("Fe", "Iron", 55.845),
    ("Co", "Cobalt", 58.9332),
    ("Ni", "Nickel", 58.6934),
    ("Cu", "Copper", 63.546),
    ("Zn", "Zinc", 65.409),
    ("Ga", "Gallium", 69.723),
    ("Ge", "Germanium", 72.64),
    ("As", "Arsenic", 74.9216),
    ("Se", "Selenium", 78.96),
    ("Br", "Bromine", 79.904),
    ("Kr", "Krypton", 83.798),
    ("Rb", "Rubidium", 85.4678),
    ("Sr", "Strontium", 87.62),
    ("Y", "Yttrium", 88.90585),
    ("Zr", "Zirconium", 91.224),
    ("Nb", "Niobium", 92.90638),
    ("Mo", "Molybdenum", 95.94),
    ("Tc", "Technetium", 98.0),
    ("Ru", "Ruthenium", 101.07),
    ("Rh", "Rhodium", 102.9055),
    ("Pd", "Palladium", 106.42),
    ("Ag", "Silver", 107.8682),
    ("Cd", "Cadmium", 112.411),
    ("In", "Indium", 114.818),
    ("Sn", "Tin", 118.71),
    ("Sb", "Antimony", 121.76),
    ("Te", "Tellurium", 127.6),
    ("I", "Iodine", 126.90447),
    ("Xe", "Xenon", 131.293),
    ("Cs", "Caesium", 132.90545),
    ("Ba", "Barium", 137.327),
    ("La", "Lanthanum", 138.9055),
    ("Ce", "Cerium", 140.116),
    ("Pr", "Praseodymium", 140.90765),
    ("Nd", "Neodymium", 144.24),
    ("Pm", "Promethium", 145.0),
    ("Sm", "Samarium", 150.36),
    ("Eu", "Europium", 151.964),
    ("Gd", "Gadolinium", 157.25),
    ("Tb", "Terbium", 158.92534),
    ("Dy", "Dysprosium", 162.5),
    ("Ho", "Holmium", 164.93032),
    ("Er", "Erbium", 167.259),
    ("Tm", "Thulium", 168.93421),
    ("Yb", "Ytterbium", 173.04),
    ("Lu", "Lutetium", 174.967),
    ("Hf", "Hafnium", 178.49),
    ("Ta", "Tantalum", 180.9479),
    ("W", "Tungsten", 183.84),
    ("Re", "Rhenium", 186.207),
    ("Os", "Osmium", 190.23),
    ("Ir", "Iridium", 192.217),
    ("Pt", "Platinum", 195.078),
    ("Au", "Gold", 196.96655),
    ("Hg", "Mercury", 200.59),
    ("Tl", "Thallium", 204.3833),
    ("Pb", "Lead", 207.2),
    ("Bi", "Bismuth", 208.98038),
    ("Po", "Polonium", 209.0),
    ("At", "Astatine", 210.0),
    ("Rn", "Radon", 222.0),
    ("Fr", "Francium", 223.0),
    ("Ra", "Radium", 226.0),
    ("Ac", "Actinium", 227.0),
    ("Th", "Thorium", 232.0381),
    ("Pa", "Protactinium", 231.03588),
    ("U", "Uranium", 238.02891),
    ("Np", "Neptunium", 237.0),
    ("Pu", "Plutonium", 244.0),
    ("Am", "Americium", 243.0),
    ("Cm", "Curium", 247.0),
    ("Bk", "Berkelium", 247.0),
    ("Cf", "Californium", 251.0),
    ("Es", "Einsteinium", 252.0),
    ("Fm", "Fermium", 257.0),
];

/// Lookup table of canonical elements keyed by atomic number.
#[derive(Debug, Clone)]
pub struct ElementTable {
    elements: FxHashMap<u32, StandardElement>,
}

impl ElementTable {
    /// Creates a table holding no elements.
    pub fn empty() -> Self {
        Self {
            elements: FxHashMap::default(),
        }
    }

    /// Creates the default table covering Z = 1..=100.
    pub fn standard() -> Self {
        let mut table = Self::empty();
        for (i, &(symbol, name, a)) in DEFAULT_ELEMENTS.iter().enumerate() {
            table.insert(StandardElement {
                symbol: symbol.to_string(),
                name: name.to_string(),
                z: i as u32 + 1,
                a,
            });
        }
        table
    }

    /// Adds or replaces the canonical element for its atomic number.
    pub fn insert(&mut self, element: StandardElement) {
        self.elements.insert(element.z, element);
    }

    /// Returns the canonical element for `z`, if tabulated.
    pub fn element(&self, z: u32) -> Option<&StandardElement> {
        self.elements.get(&z)
    }

    /// Returns the canonical element whose symbol matches `symbol`.
    pub fn by_symbol(&self, symbol: &str) -> Option<&StandardElement> {
        self.elements.values().find(|e| e.symbol == symbol)
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

impl Default for ElementTable {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_table_covers_first_hundred() {
        let table = ElementTable::standard();
        assert_eq!(table.len(), 100);
        assert_eq!(table.element(1).unwrap().symbol, "H");
        assert_eq!(table.element(26).unwrap().name, "Iron");
        assert_eq!(table.element(100).unwrap().symbol, "Fm");
        assert!(table.element(0).is_none());
        assert!(table.element(101).is_none());
    }

    #[test]
    fn lookup_by_symbol() {
        let table = ElementTable::standard();
        assert_eq!(table.by_symbol("Pb").unwrap().z, 82);
        assert!(table.by_symbol("Xx").is_none());
    }

    #[test]
    fn custom_table_replaces_entries() {
        let mut table = ElementTable::empty();
        assert!(table.is_empty());
        table.insert(StandardElement {
            symbol: "D".into(),
            name: "Deuterium".into(),
            z: 1,
            a: 2.014,
        });
        assert_eq!(table.element(1).unwrap().name, "Deuterium");
    }
}
