use crate::code_writer::{self, CodeWriter};

use std::io::Write;

type Result = std::result::Result<(), code_writer::Error>;

fn bit(value: bool) -> &'static str {
    if value {
        "'1'"
    } else {
        "'0'"
    }
}

/// A single flat design unit: entity declaration plus its `rtl` architecture.
pub struct Entity {
    pub name: String,
    pub ports: Vec<PortDecl>,
    pub signals: Vec<SignalDecl>,
    pub statements: Vec<Statement>,
}

impl Entity {
    pub const ARCHITECTURE_NAME: &'static str = "rtl";

    pub fn write<W: Write>(&self, w: &mut CodeWriter<W>) -> Result {
        w.append_line("library IEEE;")?;
        w.append_line("use IEEE.std_logic_1164.all;")?;
        w.append_newline()?;

        w.block(&format!("entity {} is", self.name), |w| {
            if self.ports.is_empty() {
                return Ok(());
            }
            w.block("port (", |w| {
                let num_ports = self.ports.len();
                for (i, port) in self.ports.iter().enumerate() {
                    port.write(w, i == num_ports - 1)?;
                }
                Ok(())
            })?;
            w.append_line(");")
        })?;
        w.append_line(&format!("end {};", self.name))?;
        w.append_newline()?;

        w.block(
            &format!(
                "architecture {} of {} is",
                Self::ARCHITECTURE_NAME,
                self.name
            ),
            |w| {
                for signal in self.signals.iter() {
                    signal.write(w)?;
                }
                Ok(())
            },
        )?;
        w.block("begin", |w| {
            for statement in self.statements.iter() {
                statement.write(w)?;
            }
            Ok(())
        })?;
        w.append_line(&format!("end {};", Self::ARCHITECTURE_NAME))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    In,
    Out,
}

pub struct PortDecl {
    pub name: String,
    pub direction: Direction,
}

impl PortDecl {
    fn write<W: Write>(&self, w: &mut CodeWriter<W>, is_last: bool) -> Result {
        let direction = match self.direction {
            Direction::In => "in",
            Direction::Out => "out",
        };
        w.append_indent()?;
        w.append(&format!("{} : {} std_logic", self.name, direction))?;
        if !is_last {
            w.append(";")?;
        }
        w.append_newline()
    }
}

pub struct SignalDecl {
    pub name: String,
    pub initial_value: Option<bool>,
}

impl SignalDecl {
    fn write<W: Write>(&self, w: &mut CodeWriter<W>) -> Result {
        w.append_indent()?;
        w.append(&format!("signal {} : std_logic", self.name))?;
        if let Some(value) = self.initial_value {
            w.append(&format!(" := {}", bit(value)))?;
        }
        w.append(";")?;
        w.append_newline()
    }
}

/// A concurrent statement.
pub enum Statement {
    Assign { target: String, source: String },
    Process(Process),
}

impl Statement {
    fn write<W: Write>(&self, w: &mut CodeWriter<W>) -> Result {
        match self {
            Statement::Assign { target, source } => {
                w.append_line(&format!("{} <= {};", target, source))
            }
            Statement::Process(process) => process.write(w),
        }
    }
}

pub struct Process {
    pub label: String,
    pub sensitivity: Vec<String>,
    pub body: Vec<Sequential>,
}

impl Process {
    fn write<W: Write>(&self, w: &mut CodeWriter<W>) -> Result {
        w.append_line(&format!(
            "{} : process ({})",
            self.label,
            self.sensitivity.join(", ")
        ))?;
        w.block("begin", |w| {
            for statement in self.body.iter() {
                statement.write(w)?;
            }
            Ok(())
        })?;
        w.append_line("end process;")
    }
}

/// A statement inside a process.
pub enum Sequential {
    Assign {
        target: String,
        expr: Expr,
    },
    /// `if`/`elsif` chain over `branches`, with an optional `else`.
    If {
        branches: Vec<(Cond, Vec<Sequential>)>,
        otherwise: Vec<Sequential>,
    },
}

impl Sequential {
    fn write<W: Write>(&self, w: &mut CodeWriter<W>) -> Result {
        match self {
            Sequential::Assign { target, expr } => {
                w.append_line(&format!("{} <= {};", target, expr))
            }
            Sequential::If {
                branches,
                otherwise,
            } => {
                for (i, (cond, body)) in branches.iter().enumerate() {
                    let keyword = if i == 0 { "if" } else { "elsif" };
                    w.block(&format!("{} {} then", keyword, cond), |w| {
                        write_all(body, w)
                    })?;
                }
                if !otherwise.is_empty() {
                    w.block("else", |w| write_all(otherwise, w))?;
                }
                w.append_line("end if;")
            }
        }
    }
}

fn write_all<W: Write>(statements: &[Sequential], w: &mut CodeWriter<W>) -> Result {
    for statement in statements {
        statement.write(w)?;
    }
    Ok(())
}

pub enum Cond {
    Equals { name: String, value: bool },
    RisingEdge(String),
    FallingEdge(String),
}

impl std::fmt::Display for Cond {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Cond::Equals { name, value } => write!(f, "({} = {})", name, bit(*value)),
            Cond::RisingEdge(name) => write!(f, "rising_edge({})", name),
            Cond::FallingEdge(name) => write!(f, "falling_edge({})", name),
        }
    }
}

pub enum Expr {
    Ref(String),
    Bit(bool),
}

impl std::fmt::Display for Expr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Expr::Ref(name) => write!(f, "{}", name),
            Expr::Bit(value) => write!(f, "{}", bit(*value)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(entity: &Entity) -> String {
        let mut w = CodeWriter::new(Vec::new());
        entity.write(&mut w).unwrap();
        String::from_utf8(w.finish().unwrap()).unwrap()
    }

    #[test]
    fn passthrough_entity() {
        let entity = Entity {
            name: "\\top\\".into(),
            ports: vec![
                PortDecl {
                    name: "a".into(),
                    direction: Direction::In,
                },
                PortDecl {
                    name: "b".into(),
                    direction: Direction::Out,
                },
            ],
            signals: vec![SignalDecl {
                name: "\\n_c0\\".into(),
                initial_value: None,
            }],
            statements: vec![
                Statement::Assign {
                    target: "\\n_c0\\".into(),
                    source: "a".into(),
                },
                Statement::Assign {
                    target: "b".into(),
                    source: "\\n_c0\\".into(),
                },
            ],
        };

        assert_eq!(
            render(&entity),
            concat!(
                "library IEEE;\n",
                "use IEEE.std_logic_1164.all;\n",
                "\n",
                "entity \\top\\ is\n",
                "    port (\n",
                "        a : in std_logic;\n",
                "        b : out std_logic\n",
                "    );\n",
                "end \\top\\;\n",
                "\n",
                "architecture rtl of \\top\\ is\n",
                "    signal \\n_c0\\ : std_logic;\n",
                "begin\n",
                "    \\n_c0\\ <= a;\n",
                "    b <= \\n_c0\\;\n",
                "end rtl;\n",
            )
        );
    }

    #[test]
    fn empty_port_list_is_omitted() {
        let entity = Entity {
            name: "\\empty\\".into(),
            ports: Vec::new(),
            signals: Vec::new(),
            statements: Vec::new(),
        };

        let text = render(&entity);
        assert!(!text.contains("port"));
        assert!(text.contains("entity \\empty\\ is\nend \\empty\\;\n"));
    }

    #[test]
    fn process_with_nested_if() {
        let process = Process {
            label: "p".into(),
            sensitivity: vec!["clk".into(), "rst".into()],
            body: vec![Sequential::If {
                branches: vec![(
                    Cond::RisingEdge("clk".into()),
                    vec![Sequential::If {
                        branches: vec![(
                            Cond::Equals {
                                name: "rst".into(),
                                value: false,
                            },
                            vec![Sequential::Assign {
                                target: "q".into(),
                                expr: Expr::Bit(true),
                            }],
                        )],
                        otherwise: vec![Sequential::Assign {
                            target: "q".into(),
                            expr: Expr::Ref("d".into()),
                        }],
                    }],
                )],
                otherwise: Vec::new(),
            }],
        };

        let mut w = CodeWriter::new(Vec::new());
        Statement::Process(process).write(&mut w).unwrap();
        let text = String::from_utf8(w.finish().unwrap()).unwrap();

        assert_eq!(
            text,
            concat!(
                "p : process (clk, rst)\n",
                "begin\n",
                "    if rising_edge(clk) then\n",
                "        if (rst = '0') then\n",
                "            q <= '1';\n",
                "        else\n",
                "            q <= d;\n",
                "        end if;\n",
                "    end if;\n",
                "end process;\n",
            )
        );
    }
}
