//! Built-in example plan used to demo the document and timeline views.

use jiff::civil::Date;

use super::{Entity, Plan, Task, TaskPriority, TaskStatus, plan::generate_id};
use crate::dates::add_days;

struct ExampleTask {
    title: &'static str,
    description: &'static str,
    start: i64,
    end: i64,
    owner: &'static str,
    status: TaskStatus,
    priority: TaskPriority,
}

const EXAMPLE_TASKS: [ExampleTask; 8] = [
    ExampleTask {
        title: "Análisis de requisitos",
        description: "Definir los requisitos funcionales y no funcionales del proyecto.",
        start: 0,
        end: 7,
        owner: "Analista",
        status: TaskStatus::Completed,
        priority: TaskPriority::High,
    },
    ExampleTask {
        title: "Diseño de interfaz",
        description: "Crear mockups y prototipos de la interfaz de usuario.",
        start: 5,
        end: 15,
        owner: "Diseñador UX/UI",
        status: TaskStatus::Completed,
        priority: TaskPriority::High,
    },
    ExampleTask {
        title: "Desarrollo del frontend",
        description: "Implementar la interfaz de usuario.",
        start: 14,
        end: 45,
        owner: "Desarrollador Frontend",
        status: TaskStatus::InProgress,
        priority: TaskPriority::High,
    },
    ExampleTask {
        title: "Desarrollo del backend",
        description: "Crear la API y la base de datos.",
        start: 14,
        end: 50,
        owner: "Desarrollador Backend",
        status: TaskStatus::InProgress,
        priority: TaskPriority::High,
    },
    ExampleTask {
        title: "Pruebas y QA",
        description: "Realizar pruebas funcionales y de usabilidad.",
        start: 48,
        end: 65,
        owner: "QA Engineer",
        status: TaskStatus::Pending,
        priority: TaskPriority::Medium,
    },
    ExampleTask {
        title: "Despliegue",
        description: "Desplegar la aplicación en producción.",
        start: 63,
        end: 70,
        owner: "DevOps",
        status: TaskStatus::Pending,
        priority: TaskPriority::Medium,
    },
    ExampleTask {
        title: "Documentación",
        description: "Crear documentación técnica y de usuario.",
        start: 60,
        end: 80,
        owner: "Technical Writer",
        status: TaskStatus::Pending,
        priority: TaskPriority::Low,
    },
    ExampleTask {
        title: "Capacitación",
        description: "Capacitar a los usuarios finales.",
        start: 75,
        end: 85,
        owner: "Trainer",
        status: TaskStatus::Pending,
        priority: TaskPriority::Low,
    },
];

impl Plan {
    /// A fully populated sample plan whose dates are relative to `today`.
    pub fn example(today: Date) -> Self {
        let day = |offset: i64| add_days(today, offset).to_string();

        let tasks = EXAMPLE_TASKS
            .iter()
            .map(|t| Task {
                id: generate_id(),
                title: t.title.to_string(),
                description: t.description.to_string(),
                start_date: day(t.start),
                end_date: day(t.end),
                owner: t.owner.to_string(),
                status: t.status,
                priority: t.priority,
            })
            .collect();

        Plan {
            id: generate_id(),
            title: "Desarrollo de Aplicación Web".to_string(),
            description: "Plan de trabajo para el desarrollo completo de una aplicación web moderna."
                .to_string(),
            author: "Equipo de Desarrollo".to_string(),
            created_on: today.to_string(),
            start_date: day(0),
            end_date: day(90),
            objectives: "Crear una aplicación web responsiva, moderna y escalable que permita a los usuarios gestionar sus proyectos de manera eficiente.".to_string(),
            tasks,
            origin: Entity {
                name: "Tech Solutions SpA".to_string(),
                tax_id: "76.123.456-7".to_string(),
                address: "Av. Providencia 1234, Santiago".to_string(),
                phone: "+56 2 2345 6789".to_string(),
                email: "contacto@techsolutions.cl".to_string(),
                contact: "Ana García".to_string(),
            },
            destination: Entity {
                name: "Retail Corp S.A.".to_string(),
                tax_id: "77.987.654-3".to_string(),
                address: "Av. Las Condes 5678, Santiago".to_string(),
                phone: "+56 2 9876 5432".to_string(),
                email: "proyectos@retailcorp.cl".to_string(),
                contact: "Carlos Mendoza".to_string(),
            },
        }
    }
}
