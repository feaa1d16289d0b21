//! JSON scenario files: map, actor types, placements, order stream.

use anyhow::{Context, Result, bail};
use serde::Deserialize;

use ls_actor::{ActorInfo, ActorRules};
use ls_core::{ActorId, Cell, PlayerId, SimConfig, Tick};
use ls_grid::{Connectivity, GridBuilder, MoverProfile};
use ls_order::{Order, OrderKind};
use ls_sim::SimBuilder;

#[derive(Debug, Deserialize)]
pub struct Scenario {
    pub name: String,
    #[serde(default)]
    pub config: SimConfig,
    /// `"four"` or `"eight"`.
    #[serde(default = "default_connectivity")]
    pub connectivity: String,
    /// Terrain glyph rows, see `GridBuilder::from_rows`.
    pub map:    Vec<String>,
    pub types:  Vec<TypeSpec>,
    pub actors: Vec<ActorSpec>,
    #[serde(default)]
    pub orders: Vec<OrderSpec>,
}

fn default_connectivity() -> String {
    "eight".to_owned()
}

#[derive(Debug, Deserialize)]
pub struct TypeSpec {
    pub name: String,
    /// Mover preset: `"infantry"`, `"wheeled"` or `"naval"`.  Absent for
    /// buildings.
    #[serde(default)]
    pub mover: Option<String>,
    /// Building size `[w, h]`; units occupy one cell.
    #[serde(default)]
    pub size: Option<[i32; 2]>,
    #[serde(default)]
    pub dock: Option<[i32; 2]>,
    #[serde(default)]
    pub attack_range: Option<u32>,
    #[serde(default)]
    pub sellable: bool,
    #[serde(default)]
    pub capturable: bool,
    #[serde(default)]
    pub can_capture: bool,
    #[serde(default)]
    pub harvester: bool,
}

#[derive(Debug, Deserialize)]
pub struct ActorSpec {
    #[serde(rename = "type")]
    pub kind:  String,
    pub owner: u8,
    pub at:    [i32; 2],
}

#[derive(Debug, Deserialize)]
pub struct OrderSpec {
    pub tick:    u64,
    pub kind:    OrderKind,
    pub subject: u32,
    #[serde(default)]
    pub target_actor: Option<u32>,
    #[serde(default)]
    pub target_cell: Option<[i32; 2]>,
    #[serde(default)]
    pub queued: bool,
}

fn mover(preset: &str) -> Result<MoverProfile> {
    Ok(match preset {
        "infantry" => MoverProfile::infantry(),
        "wheeled"  => MoverProfile::wheeled(),
        "naval"    => MoverProfile::naval(),
        other      => bail!("unknown mover preset {other:?}"),
    })
}

impl TypeSpec {
    fn to_info(&self) -> Result<ActorInfo> {
        let mut info = match (&self.mover, self.size) {
            (Some(m), None) => ActorInfo::unit(self.name.as_str(), mover(m)?),
            (None, Some([w, h])) => ActorInfo::building(self.name.as_str(), w, h),
            (None, None) => ActorInfo::building(self.name.as_str(), 1, 1),
            (Some(_), Some(_)) => bail!("{}: a type has either a mover or a size", self.name),
        };
        if let Some([x, y]) = self.dock {
            info = info.with_dock(Cell::new(x, y));
        }
        if let Some(r) = self.attack_range {
            info = info.with_attack_range(r);
        }
        info.sellable = self.sellable;
        info.capturable = self.capturable;
        info.can_capture = self.can_capture;
        info.harvester = self.harvester;
        Ok(info)
    }
}

impl Scenario {
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).context("parsing scenario")
    }

    /// Resolve names and assemble a ready-to-build [`SimBuilder`].
    pub fn into_builder(self) -> Result<SimBuilder> {
        let connectivity = match self.connectivity.as_str() {
            "four"  => Connectivity::Four,
            "eight" => Connectivity::Eight,
            other   => bail!("unknown connectivity {other:?}"),
        };
        let grid = GridBuilder::from_rows(&self.map, connectivity).context("parsing map")?;

        let mut rules = ActorRules::new();
        for spec in &self.types {
            if rules.by_name(&spec.name).is_some() {
                bail!("duplicate actor type {:?}", spec.name);
            }
            rules.add(spec.to_info()?);
        }

        let mut placements = Vec::with_capacity(self.actors.len());
        for (i, a) in self.actors.iter().enumerate() {
            let kind = rules
                .by_name(&a.kind)
                .with_context(|| format!("actor {i}: unknown type {:?}", a.kind))?;
            placements.push((kind, PlayerId(a.owner), Cell::new(a.at[0], a.at[1])));
        }

        let orders = self.orders.iter().map(|o| {
            let order = Order {
                kind:         o.kind,
                subject:      ActorId(o.subject),
                target_actor: o.target_actor.map(ActorId),
                target_cell:  o.target_cell.map(|[x, y]| Cell::new(x, y)),
                queued:       o.queued,
            };
            (Tick(o.tick), order)
        });

        let mut builder = SimBuilder::new(self.config, grid, rules).orders(orders.collect::<Vec<_>>());
        for (kind, owner, cell) in placements {
            builder = builder.actor(kind, owner, cell);
        }
        Ok(builder)
    }
}
