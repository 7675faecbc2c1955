//! Section parsers and end-of-parse resolution.
//!
//! Parsing is a single pass over the token stream.  Maps and units may
//! reference rules declared later in the file, so their declarations are
//! buffered and resolved once every section has been consumed; all other
//! references (resources, agent types, `onFail` fallbacks) resolve
//! immediately and error on anything not yet declared.

use std::path::Path;
use std::sync::Arc;

use ogb_core::{Color, ResourceBag};
use ogb_rules::{
    AgentType, Comparison, MapRule, MapType, RuleCommand, RuleValue, UnitRule, UnitType,
};
use ogb_spatial::{PathType, WayType};

use crate::catalog::TypeCatalog;
use crate::error::{ScriptError, ScriptResult};
use crate::scanner::{Token, scan};

/// Parse a scenario script from a string.
pub fn parse_script(source: &str) -> ScriptResult<TypeCatalog> {
    Parser::new(source).run()
}

/// Parse a scenario script from a file.
pub fn parse_file(path: &Path) -> ScriptResult<TypeCatalog> {
    let source = std::fs::read_to_string(path)?;
    parse_script(&source)
}

// ── Buffered declarations (rule names resolve at end of parse) ───────────────

struct MapDecl {
    name: String,
    line: u32,
    color: Color,
    capacity: u32,
    rule_names: Vec<(String, u32)>,
}

struct UnitDecl {
    name: String,
    line: u32,
    color: Color,
    map_radius: u32,
    targets: Vec<String>,
    caps: ResourceBag,
    resources: ResourceBag,
    rule_names: Vec<(String, u32)>,
}

// ── Parser ────────────────────────────────────────────────────────────────────

struct Parser<'a> {
    tokens: Vec<Token<'a>>,
    pos: usize,
    section: &'static str,
    catalog: TypeCatalog,
    maps: Vec<MapDecl>,
    units: Vec<UnitDecl>,
}

impl<'a> Parser<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            tokens: scan(source),
            pos: 0,
            section: "top level",
            catalog: TypeCatalog::new(),
            maps: Vec::new(),
            units: Vec::new(),
        }
    }

    fn run(mut self) -> ScriptResult<TypeCatalog> {
        while self.pos < self.tokens.len() {
            let tok = self.next()?;
            self.section = "top level";
            match tok.text {
                "resources" => self.parse_resources()?,
                "maps" => self.parse_maps()?,
                "paths" => self.parse_paths()?,
                "segments" => self.parse_segments()?,
                "agents" => self.parse_agents()?,
                "units" => self.parse_units()?,
                "rules" => self.parse_rules()?,
                _ => return Err(self.unexpected(tok)),
            }
        }
        self.resolve()
    }

    // ── Token helpers ─────────────────────────────────────────────────────

    fn next(&mut self) -> ScriptResult<Token<'a>> {
        match self.tokens.get(self.pos) {
            Some(&tok) => {
                self.pos += 1;
                Ok(tok)
            }
            None => Err(ScriptError::UnexpectedEnd { section: self.section }),
        }
    }

    fn expect(&mut self, keyword: &'static str) -> ScriptResult<()> {
        let tok = self.next()?;
        if tok.text == keyword {
            Ok(())
        } else {
            Err(self.unexpected(tok))
        }
    }

    fn unexpected(&self, tok: Token<'_>) -> ScriptError {
        ScriptError::UnexpectedToken {
            token: tok.text.to_owned(),
            section: self.section,
            line: tok.line,
        }
    }

    fn parse_u32(&mut self) -> ScriptResult<u32> {
        let tok = self.next()?;
        tok.text.parse().map_err(|_| ScriptError::InvalidNumber {
            token: tok.text.to_owned(),
            section: self.section,
            line: tok.line,
        })
    }

    fn parse_f32(&mut self) -> ScriptResult<f32> {
        let tok = self.next()?;
        tok.text.parse().map_err(|_| ScriptError::InvalidNumber {
            token: tok.text.to_owned(),
            section: self.section,
            line: tok.line,
        })
    }

    fn parse_percent(&mut self) -> ScriptResult<u8> {
        let tok = self.next()?;
        let value: u32 = tok.text.parse().map_err(|_| ScriptError::InvalidNumber {
            token: tok.text.to_owned(),
            section: self.section,
            line: tok.line,
        })?;
        if value > 100 {
            return Err(ScriptError::OutOfRange {
                what: "randomTilesPercent",
                value,
                max: 100,
                line: tok.line,
            });
        }
        Ok(value as u8)
    }

    fn parse_bool(&mut self) -> ScriptResult<bool> {
        let tok = self.next()?;
        match tok.text {
            "true" => Ok(true),
            "false" => Ok(false),
            _ => Err(self.unexpected(tok)),
        }
    }

    fn parse_color(&mut self) -> ScriptResult<Color> {
        let tok = self.next()?;
        Color::from_hex(tok.text).ok_or_else(|| ScriptError::InvalidColor {
            token: tok.text.to_owned(),
            section: self.section,
            line: tok.line,
        })
    }

    /// `[ name name ... ]`, recording the line of each entry.
    fn parse_name_list(&mut self) -> ScriptResult<Vec<(String, u32)>> {
        self.expect("[")?;
        let mut names = Vec::new();
        loop {
            let tok = self.next()?;
            if tok.text == "]" {
                return Ok(names);
            }
            names.push((tok.text.to_owned(), tok.line));
        }
    }

    /// `[ resource amount resource amount ... ]` where every resource must
    /// already be declared.
    fn parse_resource_list(&mut self) -> ScriptResult<Vec<(String, u32)>> {
        self.expect("[")?;
        let mut entries = Vec::new();
        loop {
            let tok = self.next()?;
            if tok.text == "]" {
                return Ok(entries);
            }
            self.check_resource(tok)?;
            let amount = self.parse_u32()?;
            entries.push((tok.text.to_owned(), amount));
        }
    }

    fn check_resource(&self, tok: Token<'_>) -> ScriptResult<()> {
        if self.catalog.has_resource(tok.text) {
            Ok(())
        } else {
            Err(ScriptError::Undefined {
                kind: "resource",
                name: tok.text.to_owned(),
                section: self.section,
                line: tok.line,
            })
        }
    }

    fn duplicate(&self, kind: &'static str, tok: Token<'_>) -> ScriptError {
        ScriptError::Duplicate {
            kind,
            name: tok.text.to_owned(),
            line: tok.line,
        }
    }

    // ── Sections ──────────────────────────────────────────────────────────

    fn parse_resources(&mut self) -> ScriptResult<()> {
        self.section = "resources";
        loop {
            let tok = self.next()?;
            match tok.text {
                "end" => return Ok(()),
                "resource" => {
                    let name = self.next()?;
                    if self.catalog.has_resource(name.text) {
                        return Err(self.duplicate("resource", name));
                    }
                    self.catalog.resources.push(name.text.to_owned());
                }
                _ => return Err(self.unexpected(tok)),
            }
        }
    }

    fn parse_maps(&mut self) -> ScriptResult<()> {
        self.section = "maps";
        let mut current: Option<MapDecl> = None;
        loop {
            let tok = self.next()?;
            match tok.text {
                "end" => {
                    if let Some(decl) = current.take() {
                        self.maps.push(decl);
                    }
                    return Ok(());
                }
                "map" => {
                    if let Some(decl) = current.take() {
                        self.maps.push(decl);
                    }
                    let name = self.next()?;
                    if self.maps.iter().any(|m| m.name == name.text) {
                        return Err(self.duplicate("map", name));
                    }
                    current = Some(MapDecl {
                        name: name.text.to_owned(),
                        line: name.line,
                        color: Color::WHITE,
                        capacity: u32::MAX,
                        rule_names: Vec::new(),
                    });
                }
                "color" if current.is_some() => {
                    let color = self.parse_color()?;
                    if let Some(decl) = current.as_mut() {
                        decl.color = color;
                    }
                }
                "capacity" if current.is_some() => {
                    let capacity = self.parse_u32()?;
                    if let Some(decl) = current.as_mut() {
                        decl.capacity = capacity;
                    }
                }
                "rules" if current.is_some() => {
                    let names = self.parse_name_list()?;
                    if let Some(decl) = current.as_mut() {
                        decl.rule_names = names;
                    }
                }
                _ => return Err(self.unexpected(tok)),
            }
        }
    }

    fn parse_paths(&mut self) -> ScriptResult<()> {
        self.section = "paths";
        loop {
            let tok = self.next()?;
            match tok.text {
                "end" => return Ok(()),
                "path" => {
                    let name = self.next()?;
                    if self.catalog.path_type(name.text).is_some() {
                        return Err(self.duplicate("path", name));
                    }
                    self.expect("color")?;
                    let color = self.parse_color()?;
                    self.catalog.path_types.push(Arc::new(PathType {
                        name: name.text.to_owned(),
                        color,
                    }));
                }
                _ => return Err(self.unexpected(tok)),
            }
        }
    }

    fn parse_segments(&mut self) -> ScriptResult<()> {
        self.section = "segments";
        loop {
            let tok = self.next()?;
            match tok.text {
                "end" => return Ok(()),
                "segment" => {
                    let name = self.next()?;
                    if self.catalog.way_type(name.text).is_some() {
                        return Err(self.duplicate("segment", name));
                    }
                    self.expect("color")?;
                    let color = self.parse_color()?;
                    self.catalog.way_types.push(Arc::new(WayType {
                        name: name.text.to_owned(),
                        color,
                    }));
                }
                _ => return Err(self.unexpected(tok)),
            }
        }
    }

    fn parse_agents(&mut self) -> ScriptResult<()> {
        self.section = "agents";
        let mut current: Option<AgentType> = None;
        loop {
            let tok = self.next()?;
            match tok.text {
                "end" => {
                    if let Some(ty) = current.take() {
                        self.catalog.agent_types.push(Arc::new(ty));
                    }
                    return Ok(());
                }
                "agent" => {
                    if let Some(ty) = current.take() {
                        self.catalog.agent_types.push(Arc::new(ty));
                    }
                    let name = self.next()?;
                    if self.catalog.agent_type(name.text).is_some() {
                        return Err(self.duplicate("agent", name));
                    }
                    current = Some(AgentType {
                        name: name.text.to_owned(),
                        color: Color::WHITE,
                        speed: 1.0,
                    });
                }
                "color" if current.is_some() => {
                    let color = self.parse_color()?;
                    if let Some(ty) = current.as_mut() {
                        ty.color = color;
                    }
                }
                "speed" if current.is_some() => {
                    let speed = self.parse_f32()?;
                    if let Some(ty) = current.as_mut() {
                        ty.speed = speed;
                    }
                }
                _ => return Err(self.unexpected(tok)),
            }
        }
    }

    fn parse_units(&mut self) -> ScriptResult<()> {
        self.section = "units";
        let mut current: Option<UnitDecl> = None;
        loop {
            let tok = self.next()?;
            match tok.text {
                "end" => {
                    if let Some(decl) = current.take() {
                        self.push_unit(decl)?;
                    }
                    return Ok(());
                }
                "unit" => {
                    if let Some(decl) = current.take() {
                        self.push_unit(decl)?;
                    }
                    let name = self.next()?;
                    if self.units.iter().any(|u| u.name == name.text) {
                        return Err(self.duplicate("unit", name));
                    }
                    current = Some(UnitDecl {
                        name: name.text.to_owned(),
                        line: name.line,
                        color: Color::WHITE,
                        map_radius: 0,
                        targets: Vec::new(),
                        caps: ResourceBag::new(),
                        resources: ResourceBag::new(),
                        rule_names: Vec::new(),
                    });
                }
                "color" if current.is_some() => {
                    let color = self.parse_color()?;
                    if let Some(decl) = current.as_mut() {
                        decl.color = color;
                    }
                }
                "mapRadius" if current.is_some() => {
                    let radius = self.parse_u32()?;
                    if let Some(decl) = current.as_mut() {
                        decl.map_radius = radius;
                    }
                }
                "targets" if current.is_some() => {
                    let names = self.parse_name_list()?;
                    if let Some(decl) = current.as_mut() {
                        decl.targets = names.into_iter().map(|(name, _)| name).collect();
                    }
                }
                "caps" if current.is_some() => {
                    let entries = self.parse_resource_list()?;
                    if let Some(decl) = current.as_mut() {
                        for (name, capacity) in entries {
                            decl.caps.add_type(&name, capacity);
                        }
                    }
                }
                "resources" if current.is_some() => {
                    let entries = self.parse_resource_list()?;
                    if let Some(decl) = current.as_mut() {
                        for (name, amount) in entries {
                            decl.resources.add_type(&name, amount);
                            decl.resources.add(&name, amount);
                        }
                    }
                }
                "rules" if current.is_some() => {
                    let names = self.parse_name_list()?;
                    if let Some(decl) = current.as_mut() {
                        decl.rule_names = names;
                    }
                }
                _ => return Err(self.unexpected(tok)),
            }
        }
    }

    /// Validate a completed unit declaration and buffer it for resolution.
    fn push_unit(&mut self, decl: UnitDecl) -> ScriptResult<()> {
        for slot in decl.resources.iter() {
            if decl.caps.iter().all(|cap| cap.name != slot.name) {
                return Err(ScriptError::MissingCap {
                    unit: decl.name.clone(),
                    resource: slot.name.clone(),
                    line: decl.line,
                });
            }
        }
        self.units.push(decl);
        Ok(())
    }

    fn parse_rules(&mut self) -> ScriptResult<()> {
        self.section = "rules";
        loop {
            let tok = self.next()?;
            match tok.text {
                "end" => return Ok(()),
                "mapRule" => self.parse_map_rule()?,
                "unitRule" => self.parse_unit_rule()?,
                _ => return Err(self.unexpected(tok)),
            }
        }
    }

    fn parse_map_rule(&mut self) -> ScriptResult<()> {
        let name = self.next()?;
        if self.catalog.map_rule(name.text).is_some() {
            return Err(self.duplicate("mapRule", name));
        }

        let mut rate = 1u32;
        let mut random_tiles = false;
        let mut random_tiles_percent = 100u8;
        let mut commands = Vec::new();

        loop {
            let tok = self.next()?;
            match tok.text {
                "end" => break,
                "rate" => rate = self.parse_u32()?,
                "randomTiles" => random_tiles = self.parse_bool()?,
                // Also reachable trailing a `map ... add/remove` command: the
                // keyword belongs to the rule, not the command.
                "randomTilesPercent" => random_tiles_percent = self.parse_percent()?,
                _ => commands.push(self.parse_command(tok)?),
            }
        }

        self.catalog.map_rules.push(Arc::new(MapRule {
            name: name.text.to_owned(),
            rate,
            random_tiles,
            random_tiles_percent,
            commands,
        }));
        Ok(())
    }

    fn parse_unit_rule(&mut self) -> ScriptResult<()> {
        let name = self.next()?;
        if self.catalog.unit_rule(name.text).is_some() {
            return Err(self.duplicate("unitRule", name));
        }

        let mut rate = 1u32;
        let mut on_fail = None;
        let mut commands = Vec::new();

        loop {
            let tok = self.next()?;
            match tok.text {
                "end" => break,
                "rate" => rate = self.parse_u32()?,
                "onFail" => {
                    let fallback = self.next()?;
                    on_fail = Some(
                        self.catalog
                            .unit_rule(fallback.text)
                            .cloned()
                            .ok_or_else(|| ScriptError::Undefined {
                                kind: "unitRule",
                                name: fallback.text.to_owned(),
                                section: self.section,
                                line: fallback.line,
                            })?,
                    );
                }
                // Unit rules have no stochastic mode; the keyword is parsed
                // and discarded when it trails a map command.
                "randomTilesPercent" => {
                    self.parse_percent()?;
                }
                _ => commands.push(self.parse_command(tok)?),
            }
        }

        self.catalog.unit_rules.push(Arc::new(UnitRule {
            name: name.text.to_owned(),
            rate,
            commands,
            on_fail,
        }));
        Ok(())
    }

    // ── Commands ──────────────────────────────────────────────────────────

    fn parse_command(&mut self, head: Token<'a>) -> ScriptResult<RuleCommand> {
        match head.text {
            "local" | "global" => {
                let resource = self.next()?;
                self.check_resource(resource)?;
                let target = if head.text == "local" {
                    RuleValue::Local { resource: resource.text.to_owned() }
                } else {
                    RuleValue::Global { resource: resource.text.to_owned() }
                };
                let op = self.next()?;
                let amount = match op.text {
                    "add" | "remove" | "greater" | "less" | "equals" => self.parse_u32()?,
                    _ => return Err(self.unexpected(op)),
                };
                Ok(match op.text {
                    "add" => RuleCommand::Add { target, amount },
                    "remove" => RuleCommand::Remove { target, amount },
                    "greater" => RuleCommand::Test {
                        target,
                        comparison: Comparison::Greater,
                        amount,
                    },
                    "less" => RuleCommand::Test {
                        target,
                        comparison: Comparison::Less,
                        amount,
                    },
                    _ => RuleCommand::Test {
                        target,
                        comparison: Comparison::Equal,
                        amount,
                    },
                })
            }
            "map" => {
                // Map names resolve at runtime against the owning city, so a
                // rule can be declared before its map.
                let name = self.next()?;
                let target = RuleValue::Map { name: name.text.to_owned() };
                let op = self.next()?;
                let amount = match op.text {
                    "add" | "remove" => self.parse_u32()?,
                    _ => return Err(self.unexpected(op)),
                };
                Ok(if op.text == "add" {
                    RuleCommand::Add { target, amount }
                } else {
                    RuleCommand::Remove { target, amount }
                })
            }
            "agent" => {
                let ty_name = self.next()?;
                let agent = self
                    .catalog
                    .agent_type(ty_name.text)
                    .cloned()
                    .ok_or_else(|| ScriptError::Undefined {
                        kind: "agent",
                        name: ty_name.text.to_owned(),
                        section: self.section,
                        line: ty_name.line,
                    })?;
                self.expect("to")?;
                let target = self.next()?;
                self.expect("add")?;
                let entries = self.parse_resource_list()?;
                let mut payload = ResourceBag::new();
                for (name, amount) in entries {
                    payload.add_type(&name, amount);
                    payload.add(&name, amount);
                }
                Ok(RuleCommand::SpawnAgent {
                    agent,
                    target: target.text.to_owned(),
                    payload,
                })
            }
            _ => Err(self.unexpected(head)),
        }
    }

    // ── End-of-parse resolution ───────────────────────────────────────────

    fn resolve(mut self) -> ScriptResult<TypeCatalog> {
        for decl in std::mem::take(&mut self.maps) {
            let mut rules = Vec::with_capacity(decl.rule_names.len());
            for (name, line) in decl.rule_names {
                rules.push(self.catalog.map_rule(&name).cloned().ok_or(
                    ScriptError::Undefined {
                        kind: "mapRule",
                        name,
                        section: "maps",
                        line,
                    },
                )?);
            }
            self.catalog.map_types.push(Arc::new(MapType {
                name: decl.name,
                color: decl.color,
                capacity: decl.capacity,
                rules,
            }));
        }

        for decl in std::mem::take(&mut self.units) {
            let mut rules = Vec::with_capacity(decl.rule_names.len());
            for (name, line) in decl.rule_names {
                rules.push(self.catalog.unit_rule(&name).cloned().ok_or(
                    ScriptError::Undefined {
                        kind: "unitRule",
                        name,
                        section: "units",
                        line,
                    },
                )?);
            }
            self.catalog.unit_types.push(Arc::new(UnitType {
                name: decl.name,
                color: decl.color,
                map_radius: decl.map_radius,
                targets: decl.targets,
                caps: decl.caps,
                resources: decl.resources,
                rules,
            }));
        }

        Ok(self.catalog)
    }
}
