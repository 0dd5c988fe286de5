//! File-based storage for projects.
//!
//! A project is stored as a single UTF-8 XML document:
//!
//! ```xml
//! <?xml version="1.0" encoding="UTF-8"?>
//! <KanbanProject name="Website">
//!   <Columns>
//!     <Column name="Backlog" wip_limit="0"/>
//!     <Column name="In Progress" wip_limit="3"/>
//!   </Columns>
//!   <Tasks>
//!     <Task id="k3v9x0q2m1ab">
//!       <Title>Write spec</Title>
//!       <Description></Description>
//!       <CreatedAt>2024-01-15T10:30:00Z</CreatedAt>
//!       <Assignees>
//!         <Assignee>ana</Assignee>
//!       </Assignees>
//!       <History>
//!         <Entry>
//!           <Timestamp>2024-01-15T11:00:00Z</Timestamp>
//!           <From>Backlog</From>
//!           <To>In Progress</To>
//!         </Entry>
//!       </History>
//!     </Task>
//!   </Tasks>
//! </KanbanProject>
//! ```
//!
//! Column membership is not stored; it is derived from each task's history
//! when the file is loaded.
//!
//! ## Components
//!
//! - [`render_project`]: Render a project to an XML document
//! - [`parse_project`]: Parse an XML document into its parts
//! - [`atomic_write`]: Replace a file without ever leaving it half written

mod file;
mod timestamp;
mod xml;

pub use file::atomic_write;
pub use timestamp::{format_timestamp, parse_timestamp};
pub use xml::{LoadedProject, parse_project, render_project};
